//! Dashboard configuration.

use std::time::Duration;

use block_metrics::MetricsConfig;

/// Default repaint interval.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(1);

/// Default bound on dialing and subscription confirmation.
pub const DEFAULT_SETUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of headers buffered between transport and aggregator.
pub const DEFAULT_FEED_BUFFER: usize = 100;

/// Runtime settings for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Repaint interval of the render loop.
    pub refresh: Duration,
    /// How long attaching to the node may take.
    pub setup_timeout: Duration,
    /// Headers buffered between transport and aggregator.
    pub feed_buffer: usize,
    /// Series and console capacities.
    pub metrics: MetricsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
            setup_timeout: DEFAULT_SETUP_TIMEOUT,
            feed_buffer: DEFAULT_FEED_BUFFER,
            metrics: MetricsConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Height of the console panel in terminal rows.
    pub fn console_height(&self) -> u16 {
        u16::try_from(self.metrics.log_height).unwrap_or(u16::MAX)
    }
}
