use strum_macros::AsRefStr;

/// How a forwarding child process came to an end.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
pub enum ForwardOutcome {
    Completed,
    Failed { code: i32 },
    /// Terminated by a shutdown signal (SIGINT, SIGTERM, SIGHUP, SIGKILL).
    Interrupted { signal: i32 },
    Crashed { signal: i32 },
    /// Killed on request through the forward handle.
    Stopped,
    WaitError(String),
}

impl ForwardOutcome {
    /// Expected endings of a forward; everything else is an operator-visible failure.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ForwardOutcome::Completed | ForwardOutcome::Interrupted { .. } | ForwardOutcome::Stopped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(ForwardOutcome::Completed.is_success());
        assert!(ForwardOutcome::Stopped.is_success());
        assert!(ForwardOutcome::Interrupted { signal: 15 }.is_success());
        assert!(!ForwardOutcome::Failed { code: 1 }.is_success());
        assert!(!ForwardOutcome::Crashed { signal: 11 }.is_success());
        assert!(!ForwardOutcome::WaitError("gone".to_string()).is_success());
    }

    #[test]
    fn test_as_ref() {
        assert_eq!(ForwardOutcome::Failed { code: 2 }.as_ref(), "Failed");
        assert_eq!(ForwardOutcome::Stopped.as_ref(), "Stopped");
    }
}
