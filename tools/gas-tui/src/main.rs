//! Gas TUI: live gas and block-time dashboard.
//!
//! ## Usage
//!
//! ```bash
//! # Attach over IPC
//! gas-tui ~/.ethereum/geth.ipc
//!
//! # Attach over WebSocket
//! gas-tui ws://localhost:8546
//! ```
//!
//! Press `q` or `Esc` to quit.

use anyhow::{Context, Result};
use block_metrics::MetricsAggregator;
use clap::Parser;
use crossterm::event::EventStream;

use gas_tui::app::{conclude, run_dashboard};
use gas_tui::cli::Args;
use gas_tui::logging::init_tracing;
use gas_tui::terminal;
use gas_tui::{feed, DashboardConfig, Endpoint};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "gas-tui".to_string());

    let endpoint = match args.require_endpoint(&program) {
        Ok(endpoint) => endpoint.to_string(),
        Err(usage) => {
            println!("{}", usage);
            std::process::exit(1);
        }
    };

    init_tracing().context("Failed to initialise logging")?;
    let config = DashboardConfig::default();

    println!("initialising...");
    let endpoint: Endpoint = endpoint.parse()?;
    let feed = feed::connect(&endpoint, &config).await?;

    let aggregator = MetricsAggregator::new(config.metrics);
    let mut ingestion = aggregator.start(feed);

    let mut terminal = match terminal::init() {
        Ok(terminal) => terminal,
        Err(e) => {
            ingestion.abort();
            return Err(e.into());
        }
    };

    let mut events = EventStream::new();
    let result = run_dashboard(&mut terminal, &mut events, &aggregator, &mut ingestion, &config).await;
    ingestion.abort();

    let restored = terminal::restore(&mut terminal);
    conclude(result, restored).with_context(|| format!("Dashboard for {} stopped", endpoint))
}
