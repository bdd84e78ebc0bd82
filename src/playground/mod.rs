//! Interactive playground: a modal one-line editor hosted over a simulated
//! shell, with the terminal integration toggled on top.

mod input;
mod line;
mod shell;
mod surface;
mod ui;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use modeterm_core::{IntegrationConfig, TerminalIntegration};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{info, warn};

use crate::error::Result;
use surface::PlaygroundSurface;

pub fn run(config: IntegrationConfig, terminal_backed: bool) -> Result<()> {
    let mut surface = PlaygroundSurface::new(terminal_backed);
    let mut integration = TerminalIntegration::new(config);
    if terminal_backed {
        if let Err(err) = integration.enable(&mut surface) {
            warn!(%err, "starting without the terminal integration");
            surface.set_status(format!("Error: {}", err));
        }
    }
    info!(terminal_backed, "playground started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = input::run_app(&mut terminal, &mut surface, &mut integration);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    integration.disable(&mut surface);
    result?;
    Ok(())
}
