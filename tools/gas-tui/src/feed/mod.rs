//! Node subscription transports.
//!
//! Attaching is setup: dial, send `eth_subscribe("newHeads")` and wait for
//! the subscription id. Any failure there is a [`DashboardError::Setup`].
//! After that a background task forwards headers into a [`HeaderSink`] and
//! fires its fault when the connection breaks.

mod ipc;
mod rpc;
mod ws;

use std::ops::ControlFlow;

use block_metrics::{HeaderFeed, HeaderSink};

use crate::config::DashboardConfig;
use crate::endpoint::Endpoint;
use crate::error::DashboardError;

use rpc::Frame;

/// Dial `endpoint` and subscribe to new heads.
pub async fn connect(
    endpoint: &Endpoint,
    config: &DashboardConfig,
) -> Result<HeaderFeed, DashboardError> {
    let attach = async {
        match endpoint {
            Endpoint::WebSocket(url) => ws::connect(url, config.feed_buffer).await,
            Endpoint::Ipc(path) => ipc::connect(path, config.feed_buffer).await,
        }
    };

    let feed = tokio::time::timeout(config.setup_timeout, attach)
        .await
        .map_err(|_| {
            DashboardError::setup(
                endpoint,
                format!("no subscription after {:?}", config.setup_timeout),
            )
        })??;

    tracing::info!(%endpoint, "Attached to client");
    Ok(feed)
}

/// Interpret a frame received before the subscription is confirmed.
///
/// `Some(Ok(id))` once confirmed, `Some(Err(reason))` on a refusal.
fn confirmation(frame: Frame) -> Option<Result<String, String>> {
    match frame {
        Frame::Subscribed(id) => Some(Ok(id)),
        Frame::Error(reason) => Some(Err(reason)),
        Frame::Header(_) | Frame::Ignored => None,
    }
}

/// Forward one post-setup frame into the sink.
///
/// Breaks with `Some(reason)` when the feed must fault, or `None` when the
/// aggregator has gone away.
async fn deliver(frame: Frame, sink: &HeaderSink) -> ControlFlow<Option<String>> {
    match frame {
        Frame::Header(header) => {
            let number = header.number;
            if sink.send(header).await.is_err() {
                return ControlFlow::Break(None);
            }
            tracing::trace!(block = number, "Forwarded header");
            ControlFlow::Continue(())
        }
        Frame::Error(reason) => ControlFlow::Break(Some(reason)),
        Frame::Subscribed(_) | Frame::Ignored => ControlFlow::Continue(()),
    }
}

/// Close the sink after the read loop ends.
fn finish(sink: HeaderSink, outcome: Option<String>) {
    match outcome {
        Some(reason) => {
            tracing::warn!(%reason, "Subscription ended");
            sink.fault(reason);
        }
        None => tracing::debug!("Header feed consumer dropped"),
    }
}
