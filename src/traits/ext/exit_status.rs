use std::process::ExitStatus;

#[cfg(unix)]
use nix::sys::signal::Signal;

use crate::model::forward_outcome::ForwardOutcome;

pub(crate) trait ExitStatusOutcomeExt {
    fn to_outcome(&self) -> ForwardOutcome;
}

impl ExitStatusOutcomeExt for ExitStatus {
    fn to_outcome(&self) -> ForwardOutcome {
        if self.success() {
            return ForwardOutcome::Completed;
        }

        if let Some(code) = self.code() {
            return ForwardOutcome::Failed { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;

            if let Some(signal) = self.signal() {
                return match Signal::try_from(signal) {
                    Ok(Signal::SIGHUP | Signal::SIGINT | Signal::SIGKILL | Signal::SIGTERM) => {
                        ForwardOutcome::Interrupted { signal }
                    }
                    _ => ForwardOutcome::Crashed { signal },
                };
            }
        }

        ForwardOutcome::Failed { code: -1 }
    }
}

/// Human readable signal name, e.g. `SIGTERM`; unknown numbers are rendered as `signal <n>`.
pub(crate) fn signal_name(signal: i32) -> String {
    #[cfg(unix)]
    {
        if let Ok(signal) = Signal::try_from(signal) {
            return signal.as_str().to_string();
        }
    }

    format!("signal {signal}")
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::process::ExitStatusExt;

    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::from_raw(0).to_outcome(), ForwardOutcome::Completed);
        assert_eq!(
            ExitStatus::from_raw(1 << 8).to_outcome(),
            ForwardOutcome::Failed { code: 1 }
        );
        assert_eq!(
            ExitStatus::from_raw(127 << 8).to_outcome(),
            ForwardOutcome::Failed { code: 127 }
        );
    }

    #[test]
    fn test_signals() {
        for signal in [
            Signal::SIGHUP,
            Signal::SIGINT,
            Signal::SIGKILL,
            Signal::SIGTERM,
        ] {
            assert_eq!(
                ExitStatus::from_raw(signal as i32).to_outcome(),
                ForwardOutcome::Interrupted {
                    signal: signal as i32
                }
            );
        }
        assert_eq!(
            ExitStatus::from_raw(Signal::SIGSEGV as i32).to_outcome(),
            ForwardOutcome::Crashed {
                signal: Signal::SIGSEGV as i32
            }
        );
    }

    #[test]
    fn test_signal_name() {
        assert_eq!(signal_name(Signal::SIGTERM as i32), "SIGTERM");
        assert_eq!(signal_name(Signal::SIGSEGV as i32), "SIGSEGV");
        assert_eq!(signal_name(1000), "signal 1000");
    }
}
