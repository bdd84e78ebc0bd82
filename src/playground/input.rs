use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use modeterm_core::surface::exit_insert;
use modeterm_core::{
    EditorMode, EditorSurface, KeyCombo, KeyOutcome, TerminalIntegration, dispatch_key,
};
use ratatui::prelude::*;
use std::io;
use tracing::debug;

use super::surface::PlaygroundSurface;
use super::ui;

const QUIT: KeyCombo = KeyCombo::ctrl('q');

/// What the event loop should do after a key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    surface: &mut PlaygroundSurface,
    integration: &mut TerminalIntegration,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, surface, integration))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(surface, integration, KeyCombo::from(key)) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

pub(crate) fn handle_key(
    surface: &mut PlaygroundSurface,
    integration: &mut TerminalIntegration,
    key: KeyCombo,
) -> Flow {
    if QUIT.matches(&key) {
        return Flow::Quit;
    }
    surface.clear_status();

    if key.code == KeyCode::F(2) {
        toggle_integration(surface, integration);
        return Flow::Continue;
    }

    match surface.mode() {
        EditorMode::Insert | EditorMode::Keypad if key.code == KeyCode::Esc => {
            exit_insert(surface)
        }
        EditorMode::Insert => surface.insert_key(key),
        EditorMode::Keypad => {
            surface.set_status(format!("SPC {} is undefined", key));
            surface.exit_keypad();
        }
        _ => {
            let catalog = &integration.config().terminal_commands;
            match dispatch_key(surface, catalog, &key) {
                KeyOutcome::Handled(command) => debug!(%key, %command, "dispatched"),
                KeyOutcome::Unbound => surface.set_status(format!("{} is undefined", key)),
            }
        }
    }
    Flow::Continue
}

fn toggle_integration(surface: &mut PlaygroundSurface, integration: &mut TerminalIntegration) {
    if integration.is_enabled() {
        integration.disable(surface);
        surface.set_status("Terminal integration disabled");
        return;
    }
    match integration.enable(surface) {
        Ok(()) => surface.set_status("Terminal integration enabled"),
        Err(err) => surface.set_status(format!("Error: {}", err)),
    }
}
