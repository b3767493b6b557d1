//! Fatal error taxonomy for the dashboard.

use block_metrics::MetricsError;
use thiserror::Error;

/// Every failure ends the process; none is retried.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The endpoint argument was not given.
    #[error("usage: {program} /path/to/socket")]
    Usage { program: String },

    /// The endpoint could not be parsed, dialed or subscribed to.
    #[error("Failed to attach to {endpoint}: {reason}")]
    Setup { endpoint: String, reason: String },

    /// The subscription broke after the dashboard started.
    #[error(transparent)]
    StreamFault(#[from] MetricsError),

    /// The terminal could not be put into dashboard mode.
    #[error("Failed to initialise terminal: {0}")]
    RenderInit(#[source] std::io::Error),

    /// Drawing or reading terminal events failed mid-run.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),
}

impl DashboardError {
    pub fn setup(endpoint: impl ToString, reason: impl ToString) -> Self {
        Self::Setup {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
