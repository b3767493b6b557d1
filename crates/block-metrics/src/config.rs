//! Capacity configuration for the aggregator.

/// Default number of samples kept per series.
pub const DEFAULT_SERIES_CAPACITY: usize = 100;

/// Default height of the console panel, borders included.
pub const DEFAULT_LOG_HEIGHT: usize = 7;

/// Rows of the console panel not available to log lines (borders and label).
pub const DEFAULT_LOG_MARGIN: usize = 3;

/// Sizes of the bounded buffers owned by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Maximum samples per series (gas limit, gas used, block time).
    pub series_capacity: usize,
    /// Height of the display area the log is drawn in.
    pub log_height: usize,
    /// Reserved rows subtracted from `log_height` before eviction kicks in.
    pub log_margin: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            series_capacity: DEFAULT_SERIES_CAPACITY,
            log_height: DEFAULT_LOG_HEIGHT,
            log_margin: DEFAULT_LOG_MARGIN,
        }
    }
}

impl MetricsConfig {
    /// Override the per-series capacity.
    pub fn with_series_capacity(mut self, capacity: usize) -> Self {
        self.series_capacity = capacity;
        self
    }

    /// Override the console height and margin.
    pub fn with_log_area(mut self, height: usize, margin: usize) -> Self {
        self.log_height = height;
        self.log_margin = margin;
        self
    }
}
