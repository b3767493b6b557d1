//! Gas TUI: live gas and block-time dashboard for an Ethereum-style node.
//!
//! Subscribes to `newHeads` over WebSocket or IPC, feeds the headers to a
//! [`block_metrics::MetricsAggregator`], and repaints from its snapshots.
//!
//! ```text
//! ┌─ Gas statistics ──────────────┐┌─ Block time ──────────────────┐
//! │Gas limit                      ││                               │
//! │▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆▆           ││ ▃  ▃ █ ▃▃  ▃ ▃ ▃▃▃            │
//! │Gas used                       ││                               │
//! │▂▅▁▇▃▅▂▆▄▃▅▇▂▁▆▄▅▃▂            ││                               │
//! └───────────────────────────────┘└───────────────────────────────┘
//! ┌─ Console ───────────────────────────────────────────────────────┐
//! │Added block: 19000001 5f3c1a9e                                   │
//! │Added block: 19000002 a01b77c4                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod feed;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use config::DashboardConfig;
pub use endpoint::Endpoint;
pub use error::DashboardError;
