//! # Block Metrics - Sliding-Window Metrics over a Header Stream
//!
//! Consumes block headers pushed by a node subscription and keeps the
//! recent history a dashboard needs to draw:
//!
//! - **Gas limit** in millions of gas units
//! - **Gas used** reduced by a flat factor of 100
//! - **Block time** in seconds since the previous header
//! - **Console log** of processed blocks
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────┐   send()    ┌────────────┐   run()    ┌───────────────────┐
//! │  Transport   │ ──────────▶ │ HeaderFeed │ ─────────▶ │ MetricsAggregator │
//! │ (HeaderSink) │   fault()   └────────────┘            │  RwLock<State>    │
//! └──────────────┘                                       └─────────┬─────────┘
//!                                                                  │ snapshot()
//!                                                                  ▼
//!                                                        ┌───────────────────┐
//!                                                        │     Renderer      │
//!                                                        └───────────────────┘
//! ```
//!
//! Every header is applied under a single write lock, so a snapshot always
//! sees whole headers. A feed fault is terminal: the state keeps what was
//! already applied and accepts nothing more.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod feed;
pub mod header;
pub mod log_buffer;
pub mod series;

// Re-export main types
pub use aggregator::{MetricsAggregator, MetricsSnapshot};
pub use config::MetricsConfig;
pub use error::{FeedClosed, MetricsError};
pub use feed::{channel, FeedEvent, HeaderFeed, HeaderSink};
pub use header::BlockHeader;
pub use log_buffer::LogBuffer;
pub use series::BoundedSeries;

/// Divisor applied to a header's gas limit (samples are in millions of gas).
pub const GAS_LIMIT_DIVISOR: u64 = 1_000_000;

/// Divisor applied to a header's gas used.
///
/// This is a flat reduction, not a ratio against the gas limit.
pub const GAS_USED_DIVISOR: u64 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_constants() {
        assert_eq!(GAS_LIMIT_DIVISOR, 1_000_000);
        assert_eq!(GAS_USED_DIVISOR, 100);
    }
}
