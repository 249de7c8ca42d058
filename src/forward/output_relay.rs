use std::sync::Arc;

use log::{error, log, Level};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Copies every line of a child output stream into the log. Resolves to the number of lines relayed.
pub(crate) fn spawn_line_relay<R>(
    runtime: &Handle,
    name: Arc<str>,
    reader: R,
    level: Level,
) -> JoinHandle<usize>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    runtime.spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        let mut counter = 0;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    counter += 1;
                    log!(level, "[{name}] {line}");
                }
                Ok(None) => break,
                Err(err) => {
                    error!("Failed to read output of {name}: {err}");
                    break;
                }
            }
        }
        counter
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relay_counts_lines() {
        let output: &'static [u8] = b"Forwarding from 0.0.0.0:8080 -> 80\nHandling connection for 8080\n";
        let handle = spawn_line_relay(&Handle::current(), Arc::from("my-svc"), output, Level::Info);
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_relay_empty_stream() {
        let output: &'static [u8] = b"";
        let handle = spawn_line_relay(&Handle::current(), Arc::from("my-svc"), output, Level::Warn);
        assert_eq!(handle.await.unwrap(), 0);
    }
}
