use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServiceDebugError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to start {tool:?}: {source}")]
    SpawnFailure {
        tool: OsString,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {0}")]
    LoggerError(#[from] flexi_logger::FlexiLoggerError),

    #[error("Failed to create {name} {}: {source}", dir.display())]
    DirError {
        name: &'static str,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Static string error: {0}")]
    StrError(&'static str),
}

impl From<&'static str> for ServiceDebugError {
    fn from(value: &'static str) -> Self {
        Self::StrError(value)
    }
}
