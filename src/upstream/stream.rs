//! Streaming passthrough of an upstream body.
//!
//! Chunks are forwarded as they arrive, so memory stays bounded by the
//! transport's chunk size. Once headers are committed the client can no
//! longer be told about a failure; the outcome of every transfer is logged
//! exactly once instead.

use axum::body::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use thiserror::Error;

/// The body ended before the upstream finished sending it.
#[derive(Debug, Error)]
#[error("transfer incomplete after {sent} bytes: {reason}")]
pub struct TransferIncomplete {
    pub sent: u64,
    pub reason: String,
}

/// Wrap `upstream` so that it stops at the first error and logs its outcome.
pub fn relay_stream<S, E>(
    upstream: S,
    url: String,
) -> impl Stream<Item = Result<Bytes, TransferIncomplete>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let transfer = Transfer {
        url,
        sent: 0,
        finished: false,
    };

    stream::unfold(Some((Box::pin(upstream), transfer)), |state| async move {
        let Some((mut upstream, mut transfer)) = state else {
            return None;
        };
        match upstream.next().await {
            Some(Ok(chunk)) => {
                transfer.sent += chunk.len() as u64;
                Some((Ok(chunk), Some((upstream, transfer))))
            }
            Some(Err(err)) => {
                let incomplete = transfer.abort(&err);
                Some((Err(incomplete), None))
            }
            None => {
                transfer.complete();
                None
            }
        }
    })
}

/// Bookkeeping for one relayed body. Dropping it unfinished means the
/// consumer (the inbound connection) went away mid-transfer.
struct Transfer {
    url: String,
    sent: u64,
    finished: bool,
}

impl Transfer {
    fn complete(&mut self) {
        self.finished = true;
        tracing::debug!(url = %self.url, bytes = self.sent, "Icon transfer complete");
    }

    fn abort(&mut self, err: &dyn std::fmt::Display) -> TransferIncomplete {
        self.finished = true;
        let reason = err.to_string();
        tracing::warn!(
            url = %self.url,
            bytes = self.sent,
            error = %reason,
            "Icon transfer incomplete: upstream read failed"
        );
        TransferIncomplete {
            sent: self.sent,
            reason,
        }
    }
}

impl Drop for Transfer {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                url = %self.url,
                bytes = self.sent,
                "Icon transfer incomplete: client went away"
            );
        }
    }
}
