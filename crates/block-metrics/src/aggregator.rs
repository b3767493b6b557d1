//! # Metrics Aggregator
//!
//! Owns the sliding-window state and applies headers to it in delivery
//! order. The render side only ever sees [`MetricsSnapshot`] copies.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MetricsConfig;
use crate::error::MetricsError;
use crate::feed::{FeedEvent, HeaderFeed, FEED_CLOSED_REASON};
use crate::header::BlockHeader;
use crate::log_buffer::LogBuffer;
use crate::series::BoundedSeries;

/// Mutable state behind the aggregator's lock.
#[derive(Debug)]
struct AggregatorState {
    gas_limit: BoundedSeries,
    gas_used: BoundedSeries,
    block_time: BoundedSeries,
    log: LogBuffer,
    /// Needed only for the next block-time delta.
    last_header: Option<BlockHeader>,
    /// Set once; no mutation after.
    fault: Option<String>,
}

impl AggregatorState {
    fn new(config: &MetricsConfig) -> Self {
        Self {
            gas_limit: BoundedSeries::new(config.series_capacity),
            gas_used: BoundedSeries::new(config.series_capacity),
            block_time: BoundedSeries::new(config.series_capacity),
            log: LogBuffer::new(config.log_height, config.log_margin),
            last_header: None,
            fault: None,
        }
    }

    fn apply(&mut self, header: &BlockHeader) {
        self.gas_limit.push(header.gas_limit_sample());
        self.gas_used.push(header.gas_used_sample());

        if let Some(previous) = &self.last_header {
            self.block_time.push(header.seconds_since(previous));
        }

        self.log.push(header.log_line());
        self.last_header = Some(header.clone());
    }
}

/// Immutable copy of the aggregator state handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Gas limit samples, millions of gas, oldest first.
    pub gas_limit: Vec<u64>,
    /// Gas used samples, oldest first.
    pub gas_used: Vec<u64>,
    /// Seconds between consecutive headers, oldest first.
    pub block_time: Vec<u64>,
    /// Console lines, newest last.
    pub log: Vec<String>,
    /// Number of the last applied header.
    pub last_block: Option<u64>,
    /// Fault description once the feed has broken.
    pub fault: Option<String>,
}

impl MetricsSnapshot {
    /// Console lines joined with newlines.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }
}

/// Shared handle to the sliding-window metrics.
///
/// Clones share the same state. Only the ingestion loop started by
/// [`MetricsAggregator::run`] or [`MetricsAggregator::start`] mutates it.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    state: Arc<RwLock<AggregatorState>>,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

impl MetricsAggregator {
    /// Create an aggregator with empty series and log.
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(AggregatorState::new(&config))),
        }
    }

    /// Spawn the ingestion loop on the current tokio runtime.
    pub fn start(&self, feed: HeaderFeed) -> JoinHandle<Result<(), MetricsError>> {
        let aggregator = self.clone();
        tokio::spawn(async move { aggregator.run(feed).await })
    }

    /// Consume the feed until it faults.
    ///
    /// Always ends in an error: a healthy subscription never finishes.
    pub async fn run(&self, mut feed: HeaderFeed) -> Result<(), MetricsError> {
        info!("Metrics ingestion started");

        while let Some(event) = feed.next().await {
            match event {
                FeedEvent::Header(header) => self.ingest(&header)?,
                FeedEvent::Fault(reason) => {
                    self.record_fault(&reason);
                    return Err(MetricsError::StreamFault(reason));
                }
            }
        }

        self.record_fault(FEED_CLOSED_REASON);
        Err(MetricsError::StreamFault(FEED_CLOSED_REASON.to_string()))
    }

    /// Apply one header atomically.
    pub(crate) fn ingest(&self, header: &BlockHeader) -> Result<(), MetricsError> {
        let mut state = self.state.write();
        if let Some(reason) = &state.fault {
            return Err(MetricsError::Faulted(reason.clone()));
        }

        state.apply(header);

        debug!(
            block = header.number,
            gas_limit = state.gas_limit.latest(),
            gas_used = state.gas_used.latest(),
            "Applied header"
        );
        Ok(())
    }

    fn record_fault(&self, reason: &str) {
        let mut state = self.state.write();
        if state.fault.is_none() {
            warn!(reason = %reason, "Header feed faulted");
            state.fault = Some(reason.to_string());
        }
    }

    /// Copy the current series and log.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.state.read();
        MetricsSnapshot {
            gas_limit: state.gas_limit.to_vec(),
            gas_used: state.gas_used.to_vec(),
            block_time: state.block_time.to_vec(),
            log: state.log.to_vec(),
            last_block: state.last_header.as_ref().map(|h| h.number),
            fault: state.fault.clone(),
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.state.read().fault.is_some()
    }
}
