// src/sinks.rs
use crate::types::{OutputFormat, Response};
use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

/// Drain `rx`, writing one rendered response per line to `out`.
/// Returns the number of responses written once the channel closes.
pub async fn write_responses<W>(
    mut out: W,
    mut rx: Receiver<Response>,
    format: OutputFormat,
) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(resp) = rx.recv().await {
        let mut line = format.render(&resp)?;
        line.push('\n');
        out.write_all(line.as_bytes())
            .await
            .context("writing response")?;
        // flush per line so interactive callers see each reply immediately
        out.flush().await.context("flushing response")?;
        written += 1;
        tracing::debug!(target = "sink", identifier = %resp.identifier, "response -> output");
    }
    tracing::info!(target = "sink", written, "response sink ended");
    Ok(written)
}

/// Spawn a sink that writes responses to stdout.
pub fn spawn_stdout_sink(rx: Receiver<Response>, format: OutputFormat) -> JoinHandle<Result<u64>> {
    tokio::spawn(write_responses(tokio::io::stdout(), rx, format))
}
