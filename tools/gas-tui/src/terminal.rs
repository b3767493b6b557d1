//! Terminal lifecycle.

use std::io::{self, Stdout};

use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::DashboardError;

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen.
///
/// Installs a panic hook that restores the terminal before the default hook
/// prints the panic.
pub fn init() -> Result<DashboardTerminal, DashboardError> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode().map_err(DashboardError::RenderInit)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(DashboardError::RenderInit(e));
    }

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| {
        let _ = restore_raw();
        DashboardError::RenderInit(e)
    })
}

/// Leave the alternate screen and raw mode.
pub fn restore(terminal: &mut DashboardTerminal) -> Result<(), DashboardError> {
    disable_raw_mode().map_err(DashboardError::Terminal)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(DashboardError::Terminal)?;
    terminal.show_cursor().map_err(DashboardError::Terminal)
}

fn restore_raw() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Whether a key event asks the dashboard to quit.
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
