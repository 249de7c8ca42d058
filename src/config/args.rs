use std::path::{Path, PathBuf};

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::config::servicedebug_configuration::ServiceDebugConfiguration;
use crate::forward::launcher::DEFAULT_TOOL;
use crate::model::forward_request::ForwardRequest;
use crate::util::error::ServiceDebugError;
use crate::util::paths::SERVICEDEBUG_HOME_DIR;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = r###"servicedebug

Helpers for reaching services that run inside a cluster.
"###
)]
pub(crate) struct Args {
    /// A directory where servicedebug keeps its state. Fatal errors are appended
    /// to <servicedebug-home-dir>/panics.log.
    #[arg(long, global = true, default_value_os_t = get_home_dir())]
    home_dir: PathBuf,

    /// A directory where servicedebug logs will be stored. If not specified, it will be set to
    /// <servicedebug-home-dir>/logs. If the directory can't be created, logs go to stderr only.
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    /// The cluster tool that performs the forward, e.g. oc or kubectl.
    #[arg(long, global = true, env = "SERVICEDEBUG_TOOL", default_value = DEFAULT_TOOL)]
    tool: String,

    /// An argument passed to the tool before its port-forward subcommand (e.g. --context=dev).
    /// Can be repeated.
    #[arg(long = "tool-arg", global = true, allow_hyphen_values = true)]
    tool_args: Vec<String>,

    #[command(subcommand)]
    pub(crate) action: Action,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Action {
    /// Forward service port to container port
    #[command(name = "portForward", alias = "port-forward")]
    PortForward(PortForwardArgs),
}

#[derive(clap::Args, Debug)]
pub(crate) struct PortForwardArgs {
    /// Container to service port map or "container:port"
    #[arg(short = 'p', long = "ports", value_parser = NonEmptyStringValueParser::new())]
    ports: String,

    /// The namespace where the service resides.
    #[arg(short = 'n', long = "ocSvcNamespace", value_parser = NonEmptyStringValueParser::new())]
    oc_svc_namespace: String,

    /// The source name (e.g. pod name) of the port forward from the service side.
    #[arg(short = 's', long = "svcSource", value_parser = NonEmptyStringValueParser::new())]
    svc_source: String,

    /// An arbitrary name of the service.
    #[arg(short = 'm', long = "svcName", value_parser = NonEmptyStringValueParser::new())]
    svc_name: String,

    /// Return as soon as the tool is started and leave the forward running in the background.
    #[arg(long)]
    pub(crate) detach: bool,
}

impl From<&PortForwardArgs> for ForwardRequest {
    fn from(value: &PortForwardArgs) -> Self {
        ForwardRequest::new(
            value.ports.as_str(),
            value.oc_svc_namespace.as_str(),
            value.svc_source.as_str(),
            value.svc_name.as_str(),
        )
    }
}

fn get_home_dir() -> PathBuf {
    SERVICEDEBUG_HOME_DIR.clone()
}

pub fn get_logs_dir(home_dir: &Path) -> PathBuf {
    home_dir.join("logs")
}

impl TryFrom<&Args> for ServiceDebugConfiguration {
    type Error = ServiceDebugError;

    fn try_from(value: &Args) -> Result<Self, Self::Error> {
        if value.tool.trim().is_empty() {
            return Err(ServiceDebugError::InvalidArgument(
                "The tool must not be empty".to_string(),
            ));
        }

        let home_dir = value.home_dir.clone();
        let logs_dir = value
            .logs_dir
            .clone()
            .unwrap_or_else(|| get_logs_dir(&home_dir));

        let mut dir_errors = vec![];
        let home_dir = wrap_opt(home_dir, "home dir", &mut dir_errors);
        let logs_dir = wrap_opt(logs_dir, "logs dir", &mut dir_errors);

        Ok(Self {
            home_dir,
            logs_dir,
            tool: value.tool.clone(),
            tool_args: value.tool_args.clone(),
            dir_errors,
        })
    }
}

fn wrap_opt(
    dir: PathBuf,
    name: &'static str,
    dir_errors: &mut Vec<ServiceDebugError>,
) -> Option<PathBuf> {
    match std::fs::create_dir_all(&dir) {
        Ok(_) => Some(dir),
        Err(source) => {
            dir_errors.push(ServiceDebugError::DirError { name, dir, source });
            None
        }
    }
}
