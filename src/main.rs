use std::sync::atomic::AtomicUsize;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use tokio::runtime::Runtime;

use crate::config::args::{Action, Args, PortForwardArgs};
use crate::config::servicedebug_configuration::ServiceDebugConfiguration;
use crate::forward::launcher::PortForwardLauncher;
use crate::model::forward_request::ForwardRequest;
use crate::util::logging::setup_logger;
use crate::util::panics::{install_panic_hook, set_panics_dir, ResultExt};

pub mod config;
pub mod forward;
pub mod model;
pub mod traits;
pub mod util;

fn spawn_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name_fn(|| {
            static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
            let id = ATOMIC_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            format!("servicedebug-{}", id)
        })
        .enable_all()
        .build()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C, the forward can only end on its own: {err}");
        std::future::pending::<()>().await;
    }
}

/// Returns whether the forward ended the way an operator expects it to.
fn port_forward(
    runtime: &Runtime,
    configuration: &ServiceDebugConfiguration,
    args: &PortForwardArgs,
) -> bool {
    let launcher = PortForwardLauncher::new(&configuration.tool, configuration.tool_args.clone())
        .with_output_relay(!args.detach);

    let handle = {
        let _guard = runtime.enter();
        launcher.launch(ForwardRequest::from(args)).unwrap_or_exit()
    };

    if args.detach {
        info!("Detached from forwarding with pid {:?}", handle.pid());
        return true;
    }

    let outcome = runtime.block_on(handle.run_until(shutdown_signal()));
    info!("Forwarding ended: {}", outcome.as_ref());
    outcome.is_success()
}

fn main() -> Result<()> {
    install_panic_hook();

    let args = Args::parse();
    let configuration =
        ServiceDebugConfiguration::try_from(&args).context("Invalid configuration")?;

    let _logger = setup_logger(configuration.logs_dir.as_deref())?;
    if let Some(home_dir) = configuration.home_dir.as_deref() {
        set_panics_dir(home_dir);
    }
    for dir_error in &configuration.dir_errors {
        error!("{dir_error}");
    }
    if configuration.logs_dir.is_none() {
        warn!("No usable logs dir, logging to stderr only");
    }
    info!("{:?}", configuration);

    let runtime = spawn_runtime().context("Failed to start the tokio runtime")?;

    let succeeded = match &args.action {
        Action::PortForward(port_forward_args) => {
            port_forward(&runtime, &configuration, port_forward_args)
        }
    };

    drop(runtime);
    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
