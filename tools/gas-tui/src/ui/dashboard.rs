//! Dashboard UI rendering.

use block_metrics::MetricsSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

/// Render the dashboard: gas and block-time panels over the console.
pub fn render(frame: &mut Frame, snapshot: &MetricsSnapshot, console_height: u16) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                 // Graphs
            Constraint::Length(console_height), // Console
        ])
        .split(frame.area());

    let graphs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_gas_statistics(frame, snapshot, graphs[0]);
    render_block_time(frame, snapshot, graphs[1]);
    render_console(frame, snapshot, rows[1]);
}

/// Render gas limit and gas used as two stacked sparklines.
fn render_gas_statistics(frame: &mut Frame, snapshot: &MetricsSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Gas statistics ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_titled_sparkline(frame, "Gas limit", &snapshot.gas_limit, Color::Cyan, halves[0]);
    render_titled_sparkline(frame, "Gas used", &snapshot.gas_used, Color::Red, halves[1]);
}

/// Render the block time sparkline.
fn render_block_time(frame: &mut Frame, snapshot: &MetricsSnapshot, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Block time ");
    let data = newest(&snapshot.block_time, block.inner(area).width);

    let sparkline = Sparkline::default()
        .block(block)
        .data(data)
        .style(Style::default().fg(Color::Magenta));

    frame.render_widget(sparkline, area);
}

fn render_titled_sparkline(frame: &mut Frame, title: &str, data: &[u64], color: Color, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let label = Paragraph::new(Span::styled(title.to_string(), Style::default().fg(Color::White)));
    frame.render_widget(label, parts[0]);

    let sparkline = Sparkline::default()
        .data(newest(data, parts[1].width))
        .style(Style::default().fg(color));
    frame.render_widget(sparkline, parts[1]);
}

/// Render the console log, newest line last.
fn render_console(frame: &mut Frame, snapshot: &MetricsSnapshot, area: Rect) {
    let console = Paragraph::new(snapshot.log_text())
        .block(Block::default().borders(Borders::ALL).title(" Console "));
    frame.render_widget(console, area);
}

/// The newest samples that fit in `width` columns.
fn newest(data: &[u64], width: u16) -> &[u64] {
    &data[data.len().saturating_sub(width as usize)..]
}
