use std::path::PathBuf;

use crate::util::error::ServiceDebugError;

#[derive(Debug)]
pub struct ServiceDebugConfiguration {
    pub home_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
    pub tool: String,
    pub tool_args: Vec<String>,
    /// Directories that could not be created; reported once logging is up.
    pub dir_errors: Vec<ServiceDebugError>,
}
