use std::future::Future;
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};

use crate::model::forward_outcome::ForwardOutcome;

/// Owns the detached observer of a running forward. Dropping it leaves the observer running.
pub(crate) struct ForwardHandle {
    display_name: Arc<str>,
    pid: Option<u32>,
    stop_sender: Option<oneshot::Sender<()>>,
    observer: JoinHandle<ForwardOutcome>,
}

impl ForwardHandle {
    pub(crate) fn new(
        display_name: Arc<str>,
        pid: Option<u32>,
        stop_sender: oneshot::Sender<()>,
        observer: JoinHandle<ForwardOutcome>,
    ) -> Self {
        Self {
            display_name,
            pid,
            stop_sender: Some(stop_sender),
            observer,
        }
    }

    pub(crate) fn pid(&self) -> Option<u32> {
        self.pid
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.observer.is_finished()
    }

    pub(crate) async fn join(self) -> ForwardOutcome {
        observer_outcome(self.observer.await)
    }

    /// Kills the child and waits for the observer to report.
    pub(crate) async fn stop(mut self) -> ForwardOutcome {
        info!("Stopping forwarding: {}", self.display_name);
        if let Some(stop_sender) = self.stop_sender.take() {
            if stop_sender.send(()).is_err() {
                warn!("Forwarding {} has already finished", self.display_name);
            }
        }
        self.join().await
    }

    /// Waits for the child to exit, stopping it as soon as `shutdown` resolves.
    pub(crate) async fn run_until(mut self, shutdown: impl Future<Output = ()>) -> ForwardOutcome {
        tokio::select! {
            result = &mut self.observer => observer_outcome(result),
            _ = shutdown => {
                info!("Shutdown requested for {}", self.display_name);
                self.stop().await
            }
        }
    }
}

fn observer_outcome(result: Result<ForwardOutcome, JoinError>) -> ForwardOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(err) => ForwardOutcome::WaitError(format!("Observer task failed: {err}")),
    }
}
