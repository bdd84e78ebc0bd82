use tracing::{debug, warn};

use crate::bridge::PositionBridge;
use crate::command::{Command, TerminalCommands};
use crate::keys::KeyCombo;
use crate::surface::EditorSurface;

/// Result of feeding one key through a surface's keymap chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key resolved to this command, which has been run.
    Handled(Command),
    /// Nothing in the chain binds the key; the host decides what to do.
    Unbound,
}

/// Resolve `key` for the surface's current mode and run the command.
pub fn dispatch_key(
    surface: &mut dyn EditorSurface,
    catalog: &TerminalCommands,
    key: &KeyCombo,
) -> KeyOutcome {
    let Some(command) = surface.keymaps().resolve(surface.mode(), key).cloned() else {
        return KeyOutcome::Unbound;
    };
    debug!(surface = %surface.id(), %key, %command, "dispatching");

    match &command {
        Command::Editor(id) => surface.run_command(id),
        Command::Terminal(id) => {
            let Some(sequence) = catalog.sequence(id) else {
                warn!(%id, "terminal command missing from catalog");
                return KeyOutcome::Handled(command);
            };
            if let Some(terminal) = surface.terminal_mut() {
                for key in sequence {
                    terminal.send_key(key);
                }
            }
        }
        Command::SyncThenDelegate(id) => {
            PositionBridge.sync(surface);
            surface.run_command(id);
        }
    }
    KeyOutcome::Handled(command)
}
