use std::path::Path;

use flexi_logger::{Duplicate, FileSpec, LoggerHandle};

use crate::util::error::ServiceDebugError;
use crate::util::paths::LOG_BASENAME;

/// Starts the global logger. The returned handle must outlive every log call.
pub(crate) fn setup_logger(logs_dir: Option<&Path>) -> Result<LoggerHandle, ServiceDebugError> {
    let logger = flexi_logger::Logger::try_with_env_or_str("info")?;

    let logger = match logs_dir {
        Some(logs_dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(logs_dir)
                    .basename(LOG_BASENAME)
                    .suppress_timestamp(),
            )
            .duplicate_to_stderr(Duplicate::All)
            .format_for_files(flexi_logger::with_thread),
        None => logger.log_to_stderr(),
    };

    let handle = logger
        .format_for_stderr(flexi_logger::colored_with_thread)
        .start()?;

    Ok(handle)
}
