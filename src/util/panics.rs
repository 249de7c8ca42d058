use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::error;

use crate::util::paths::{PANICS_FILE_NAME, SERVICEDEBUG_HOME_DIR};

static PANICS_DIR: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn set_panics_dir(dir: &Path) {
    if PANICS_DIR.set(dir.to_path_buf()).is_err() {
        error!("Panics dir was already set, ignoring {}", dir.display());
    }
}

/// Records panics in the panics file before handing over to the default hook.
pub(crate) fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(err) = write_to_panics(&info.to_string()) {
            eprintln!("Failed writing a panic to {PANICS_FILE_NAME}: {err}");
        }
        default_hook(info);
    }));
}

pub(crate) trait ResultExt<T, E> {
    fn unwrap_or_exit(self) -> T
    where
        E: Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[inline]
    #[track_caller]
    fn unwrap_or_exit(self) -> T
    where
        E: Display,
    {
        match self {
            Ok(t) => t,
            Err(e) => fatal_result("Fatal error", &e),
        }
    }
}

#[inline(never)]
#[cold]
#[track_caller]
fn fatal_result(msg: &str, value: &dyn Display) -> ! {
    let location = std::panic::Location::caller();
    let message = format!(
        "{}:{}:{} :: {msg}: {value}",
        location.file(),
        location.line(),
        location.column()
    );

    let additional_message = match write_to_panics(&message) {
        Ok(_) => "".to_string(),
        Err(err) => format!("; Failed writing an error to {PANICS_FILE_NAME}: {err}"),
    };

    error!("{msg}: {value}{additional_message}");
    std::process::exit(1);
}

fn write_to_panics(message: &str) -> anyhow::Result<()> {
    let dir = PANICS_DIR
        .get()
        .map(PathBuf::as_path)
        .unwrap_or(SERVICEDEBUG_HOME_DIR.as_path());
    append_line(dir, message)
}

fn append_line(dir: &Path, message: &str) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(PANICS_FILE_NAME))?;

    writeln!(file, "{message}")?;

    Ok(())
}
