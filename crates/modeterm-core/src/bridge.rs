use tracing::debug;

use crate::surface::EditorSurface;

/// Pushes the editor's cursor position into the terminal session.
///
/// One-way: the terminal's own cursor is never read back.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionBridge;

impl PositionBridge {
    /// Sync the surface's current position into its terminal session.
    ///
    /// Returns `false` without doing anything when the surface is not
    /// terminal-backed.
    pub fn sync(&self, surface: &mut dyn EditorSurface) -> bool {
        let id = surface.id();
        let position = surface.position();
        match surface.terminal_mut() {
            Some(terminal) => {
                debug!(surface = %id, %position, "syncing terminal cursor");
                terminal.set_cursor(position);
                true
            }
            None => false,
        }
    }
}
