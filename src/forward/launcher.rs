use std::ffi::OsString;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn, Level};
use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::forward::handle::ForwardHandle;
use crate::forward::output_relay::spawn_line_relay;
use crate::model::forward_outcome::ForwardOutcome;
use crate::model::forward_request::{ForwardRequest, PortPair};
use crate::traits::ext::exit_status::{signal_name, ExitStatusOutcomeExt};
use crate::util::error::ServiceDebugError;

pub(crate) const DEFAULT_TOOL: &str = "oc";
pub(crate) const FORWARD_SUBCOMMAND: &str = "port-forward";
pub(crate) const BIND_ADDRESS: &str = "0.0.0.0";
const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Starts port forwards by shelling out to an external cluster tool (`oc`, `kubectl`).
#[derive(Debug, Clone)]
pub(crate) struct PortForwardLauncher {
    tool: OsString,
    tool_args: Vec<String>,
    relay_output: bool,
}

impl PortForwardLauncher {
    pub(crate) fn new(tool: impl Into<OsString>, tool_args: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            tool_args,
            relay_output: true,
        }
    }

    /// Without the relay the child output is discarded, so the child can outlive this process.
    pub(crate) fn with_output_relay(mut self, relay_output: bool) -> Self {
        self.relay_output = relay_output;
        self
    }

    /// Validates the request, spawns the tool and hands the child over to a detached observer.
    /// Returns as soon as the child is spawned.
    pub(crate) fn launch(&self, request: ForwardRequest) -> Result<ForwardHandle, ServiceDebugError> {
        let pair = request.validate()?;
        let runtime = Handle::try_current()
            .map_err(|_| ServiceDebugError::from("Launching a forward requires a tokio runtime"))?;

        let args = build_args(&pair, &request);
        info!(
            "Forwarding {}/{} port to {}",
            request.display_name, request.namespace, pair.container_port
        );

        let mut command = Command::new(&self.tool);
        command
            .args(&self.tool_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(output_stdio(self.relay_output))
            .stderr(output_stdio(self.relay_output));
        info!("Running command: {:?}", command.as_std());

        let mut child = command
            .spawn()
            .map_err(|source| ServiceDebugError::SpawnFailure {
                tool: self.tool.clone(),
                source,
            })?;

        let display_name: Arc<str> = Arc::from(request.display_name);
        let pid = child.id();
        info!("Started forwarding {display_name} with pid {pid:?}");

        let mut relays = vec![];
        if let Some(stdout) = child.stdout.take() {
            relays.push(spawn_line_relay(
                &runtime,
                Arc::clone(&display_name),
                stdout,
                Level::Info,
            ));
        }
        if let Some(stderr) = child.stderr.take() {
            relays.push(spawn_line_relay(
                &runtime,
                Arc::clone(&display_name),
                stderr,
                Level::Warn,
            ));
        }

        let (stop_sender, stop_receiver) = oneshot::channel();
        let observer = runtime.spawn(observe(
            child,
            relays,
            stop_receiver,
            Arc::clone(&display_name),
        ));

        Ok(ForwardHandle::new(display_name, pid, stop_sender, observer))
    }
}

fn output_stdio(relay_output: bool) -> Stdio {
    if relay_output {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

pub(crate) fn build_args(pair: &PortPair, request: &ForwardRequest) -> Vec<String> {
    vec![
        FORWARD_SUBCOMMAND.to_string(),
        request.source_ref.clone(),
        "--address".to_string(),
        BIND_ADDRESS.to_string(),
        pair.to_string(),
        "-n".to_string(),
        request.namespace.clone(),
    ]
}

async fn observe(
    mut child: Child,
    relays: Vec<JoinHandle<usize>>,
    stop_receiver: oneshot::Receiver<()>,
    display_name: Arc<str>,
) -> ForwardOutcome {
    // A dropped handle closes the channel; the branch is then disabled and we keep waiting.
    let outcome = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => status.to_outcome(),
            Err(err) => ForwardOutcome::WaitError(err.to_string()),
        },
        Ok(()) = stop_receiver => kill(&mut child, &display_name).await,
    };

    // The child may exit before its last lines are read from the pipes.
    drain_relays(relays, &display_name).await;
    log_outcome(&display_name, &outcome);
    outcome
}

async fn drain_relays(relays: Vec<JoinHandle<usize>>, display_name: &str) {
    for relay in relays {
        match tokio::time::timeout(RELAY_DRAIN_TIMEOUT, relay).await {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => error!("Output relay of {display_name} failed: {err}"),
            Err(_) => warn!(
                "Output of {display_name} was not drained within {:?}",
                RELAY_DRAIN_TIMEOUT
            ),
        }
    }
}

async fn kill(child: &mut Child, display_name: &str) -> ForwardOutcome {
    match child.kill().await {
        Ok(()) => ForwardOutcome::Stopped,
        Err(err) => {
            error!("Failed to kill forwarding {display_name}: {err}");
            match child.wait().await {
                Ok(status) => status.to_outcome(),
                Err(err) => ForwardOutcome::WaitError(err.to_string()),
            }
        }
    }
}

fn log_outcome(display_name: &str, outcome: &ForwardOutcome) {
    match outcome {
        ForwardOutcome::Completed => info!("Forwarding {display_name} finished"),
        ForwardOutcome::Stopped => info!("Forwarding {display_name} stopped"),
        ForwardOutcome::Interrupted { signal } => {
            info!(
                "Forwarding {display_name} terminated by {}",
                signal_name(*signal)
            )
        }
        ForwardOutcome::Failed { code } => {
            error!("Forwarding {display_name} finished with exit code {code}")
        }
        ForwardOutcome::Crashed { signal } => {
            error!("Forwarding {display_name} killed by {}", signal_name(*signal))
        }
        ForwardOutcome::WaitError(err) => {
            error!("Forwarding {display_name} finished with error: {err}")
        }
    }
}
