// src/service.rs
use crate::id::SharedIdentifierBuilder;
use crate::types::Response;
use anyhow::{Result, anyhow};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, warn};

async fn emit(builder: &SharedIdentifierBuilder, tx: &Sender<Response>) -> Result<()> {
    let resp = builder.try_build_response()?;
    debug!(target = "service", identifier = %resp.identifier, "issued");
    tx.send(resp)
        .await
        .map_err(|_| anyhow!("response sink closed"))
}

/// Issue `count` responses into `tx`.
pub async fn issue(
    builder: &SharedIdentifierBuilder,
    count: u64,
    tx: &Sender<Response>,
) -> Result<u64> {
    for n in 0..count {
        if let Err(e) = emit(builder, tx).await {
            warn!(target = "service", issued = n, "issue stopped: {e:#}");
            return Err(e);
        }
    }
    info!(target = "service", count, next = builder.peek(), "issue done");
    Ok(count)
}

/// Issue one response per line read from `reader` until EOF or `shutdown`
/// resolves. Line contents are ignored and never decoded; each
/// newline-terminated segment is only a trigger.
pub async fn serve_lines<R, F>(
    reader: R,
    builder: &SharedIdentifierBuilder,
    tx: &Sender<Response>,
    shutdown: F,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut segments = reader.split(b'\n');
    let mut served = 0u64;
    tokio::pin!(shutdown);

    info!(target = "service", next = builder.peek(), "serve: started");
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!(target = "service", served, "serve: shutdown requested");
                break;
            }
            segment = segments.next_segment() => match segment? {
                Some(_) => {
                    emit(builder, tx).await?;
                    served += 1;
                }
                None => {
                    debug!(target = "service", served, "serve: input closed");
                    break;
                }
            },
        }
    }
    Ok(served)
}
