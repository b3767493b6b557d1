//! Render loop and teardown.

use std::io;

use block_metrics::{MetricsAggregator, MetricsError};
use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use ratatui::{backend::Backend, Terminal};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::terminal::is_quit;
use crate::ui;

/// Main render loop.
///
/// Repaints on every tick and resize. Returns `Ok` on quit or when `events`
/// ends, and the stream fault when ingestion ends.
pub async fn run_dashboard<B, S>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    aggregator: &MetricsAggregator,
    ingestion: &mut JoinHandle<Result<(), MetricsError>>,
    config: &DashboardConfig,
) -> Result<(), DashboardError>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut ticker = tokio::time::interval(config.refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                draw(terminal, aggregator, config)?;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit(&key) => return Ok(()),
                Some(Ok(Event::Resize(_, _))) => {
                    terminal.autoresize().map_err(DashboardError::Terminal)?;
                    terminal.clear().map_err(DashboardError::Terminal)?;
                    draw(terminal, aggregator, config)?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(DashboardError::Terminal(e)),
                None => return Ok(()),
            },
            joined = &mut *ingestion => {
                let fault = match joined {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => MetricsError::StreamFault("ingestion stopped".to_string()),
                    Err(e) => MetricsError::StreamFault(e.to_string()),
                };
                return Err(fault.into());
            }
        }
    }
}

/// Combine the loop outcome with the terminal restore.
///
/// A loop error wins; a restore failure alongside it is only logged.
pub fn conclude(
    result: Result<(), DashboardError>,
    restored: Result<(), DashboardError>,
) -> Result<(), DashboardError> {
    match (result, restored) {
        (Err(e), Err(restore)) => {
            tracing::warn!(error = %restore, "Failed to restore terminal");
            eprintln!("Failed to restore terminal: {}", restore);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    aggregator: &MetricsAggregator,
    config: &DashboardConfig,
) -> Result<(), DashboardError> {
    let snapshot = aggregator.snapshot();
    terminal
        .draw(|frame| ui::render(frame, &snapshot, config))
        .map_err(DashboardError::Terminal)?;
    Ok(())
}
