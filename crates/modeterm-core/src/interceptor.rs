use std::sync::Arc;

use tracing::debug;

use crate::bridge::PositionBridge;
use crate::mode::EditorMode;
use crate::surface::{EditorSurface, ExitInsert};

/// Wrapper around the editor's exit-insert entry point that lands
/// terminal-backed surfaces in [`EditorMode::Terminal`] instead of `Normal`.
///
/// Decision order:
/// 1. keypad active: leave the keypad;
/// 2. insert while recording a quick macro: stop it, macro-aware exit;
/// 3. insert on a terminal-backed surface: sync the cursor, enter TERMINAL;
/// 4. anything else: the original handler.
pub struct TerminalExitInsert {
    original: Arc<dyn ExitInsert>,
    bridge: PositionBridge,
}

impl TerminalExitInsert {
    pub fn new(original: Arc<dyn ExitInsert>, bridge: PositionBridge) -> Self {
        Self { original, bridge }
    }
}

impl ExitInsert for TerminalExitInsert {
    fn exit_insert(&self, surface: &mut dyn EditorSurface) {
        let mode = surface.mode();
        if mode == EditorMode::Keypad {
            surface.exit_keypad();
        } else if mode.is_insert() && surface.is_recording_quick_macro() {
            surface.stop_quick_macro();
            surface.macro_insert_exit();
        } else if mode.is_insert() && surface.is_terminal_backed() {
            debug!(surface = %surface.id(), "insert exit -> terminal");
            self.bridge.sync(surface);
            surface.switch_mode(EditorMode::Terminal);
        } else {
            self.original.exit_insert(surface);
        }
    }
}
