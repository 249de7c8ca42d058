use std::path::PathBuf;

use lazy_static::lazy_static;

pub const SELF_NAME: &str = ".servicedebug";
pub const LOG_BASENAME: &str = "servicedebug";
pub const PANICS_FILE_NAME: &str = "panics.log";

lazy_static! {
    pub static ref HOME_DIR: PathBuf = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
    pub static ref SERVICEDEBUG_HOME_DIR: PathBuf = HOME_DIR.join(SELF_NAME);
}
