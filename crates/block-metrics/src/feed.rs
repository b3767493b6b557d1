//! # Header Feed
//!
//! Channel pair connecting a transport to the aggregator. The transport holds
//! the [`HeaderSink`] and pushes headers as the node announces them; the
//! aggregator drains the [`HeaderFeed`].
//!
//! The fault signal fires at most once: [`HeaderSink::fault`] consumes the
//! sink, so nothing can be sent after it. Headers sent before the fault are
//! always delivered before it.

use tokio::sync::{mpsc, oneshot};

use crate::error::FeedClosed;
use crate::header::BlockHeader;

/// Reason reported when the sink goes away without an explicit fault.
pub const FEED_CLOSED_REASON: &str = "header feed closed";

/// What the feed delivers next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A new block header.
    Header(BlockHeader),
    /// The subscription broke. Always the last event.
    Fault(String),
}

/// Create a connected sink/feed pair buffering up to `buffer` headers.
pub fn channel(buffer: usize) -> (HeaderSink, HeaderFeed) {
    let (header_tx, header_rx) = mpsc::channel(buffer.max(1));
    let (fault_tx, fault_rx) = oneshot::channel();

    let sink = HeaderSink {
        headers: header_tx,
        fault: fault_tx,
    };
    let feed = HeaderFeed {
        headers: header_rx,
        fault: fault_rx,
        finished: false,
    };
    (sink, feed)
}

/// Producer half, owned by the transport task.
#[derive(Debug)]
pub struct HeaderSink {
    headers: mpsc::Sender<BlockHeader>,
    fault: oneshot::Sender<String>,
}

impl HeaderSink {
    /// Push a header, waiting for buffer space.
    pub async fn send(&self, header: BlockHeader) -> Result<(), FeedClosed> {
        self.headers.send(header).await.map_err(|_| FeedClosed)
    }

    /// Whether the consuming side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.headers.is_closed()
    }

    /// Fire the fault signal and close the feed.
    pub fn fault(self, reason: impl Into<String>) {
        let _ = self.fault.send(reason.into());
    }
}

/// Consumer half, drained by the aggregator.
#[derive(Debug)]
pub struct HeaderFeed {
    headers: mpsc::Receiver<BlockHeader>,
    fault: oneshot::Receiver<String>,
    finished: bool,
}

impl HeaderFeed {
    /// Wait for the next header or the fault.
    ///
    /// Returns `None` once the fault has been delivered.
    pub async fn next(&mut self) -> Option<FeedEvent> {
        if self.finished {
            return None;
        }

        tokio::select! {
            biased;

            header = self.headers.recv() => match header {
                Some(header) => Some(FeedEvent::Header(header)),
                None => {
                    self.finished = true;
                    let reason = self
                        .fault
                        .try_recv()
                        .unwrap_or_else(|_| FEED_CLOSED_REASON.to_string());
                    Some(FeedEvent::Fault(reason))
                }
            },
            fault = &mut self.fault => {
                self.finished = true;
                let reason = fault.unwrap_or_else(|_| FEED_CLOSED_REASON.to_string());
                Some(FeedEvent::Fault(reason))
            }
        }
    }
}
