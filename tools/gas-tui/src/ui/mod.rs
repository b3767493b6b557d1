//! UI module for TUI rendering.

pub mod dashboard;

use block_metrics::MetricsSnapshot;
use ratatui::Frame;

use crate::config::DashboardConfig;

/// Render one frame from a metrics snapshot.
pub fn render(frame: &mut Frame, snapshot: &MetricsSnapshot, config: &DashboardConfig) {
    dashboard::render(frame, snapshot, config.console_height());
}
