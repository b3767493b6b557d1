//! Error types for the metrics pipeline

use thiserror::Error;

/// Errors surfaced by the aggregator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// The header feed broke after zero or more headers were applied.
    #[error("Header stream fault: {0}")]
    StreamFault(String),

    /// The aggregator already recorded a fault and accepts no more headers.
    #[error("Aggregator is faulted: {0}")]
    Faulted(String),
}

/// Returned by `HeaderSink::send` when the consuming side is gone.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Header feed closed")]
pub struct FeedClosed;
