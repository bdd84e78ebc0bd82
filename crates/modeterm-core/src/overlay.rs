//! Mode-keymap overlay: a keymap placed at the front of a surface's chain
//! while a source mode is active.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::bridge::PositionBridge;
use crate::error::{Error, Result};
use crate::keymap::Keymap;
use crate::mode::{EditorMode, ModeChange};
use crate::surface::{EditorSurface, ModeObserver};

pub const OVERLAY_KEYMAP: &str = "terminal-overlay";

#[derive(Clone, Debug)]
pub struct ModeOverlay {
    keymap: Arc<Keymap>,
    source_mode: EditorMode,
}

impl ModeOverlay {
    /// An overlay tied to [`EditorMode::Terminal`].
    pub fn new(keymap: Arc<Keymap>) -> Self {
        Self::for_mode(keymap, EditorMode::Terminal)
    }

    pub fn for_mode(keymap: Arc<Keymap>, source_mode: EditorMode) -> Self {
        Self {
            keymap,
            source_mode,
        }
    }

    pub fn keymap(&self) -> &Arc<Keymap> {
        &self.keymap
    }

    pub fn source_mode(&self) -> EditorMode {
        self.source_mode
    }

    pub fn is_active(&self, surface: &dyn EditorSurface) -> bool {
        surface.keymaps().contains(self.keymap.id())
    }

    /// Put the overlay at the front of the surface's chain. Does nothing when
    /// it is already there.
    pub fn activate(&self, surface: &mut dyn EditorSurface) -> Result<()> {
        if !surface.is_terminal_backed() {
            return Err(Error::Precondition {
                surface: surface.id().to_string(),
                operation: "overlay activation",
            });
        }
        if self.is_active(surface) {
            return Ok(());
        }
        debug!(surface = %surface.id(), keymap = %self.keymap.id(), "activating overlay");
        surface.keymaps_mut().insert_front(Arc::clone(&self.keymap));
        Ok(())
    }

    /// Remove every instance of the overlay from the surface's chain.
    pub fn deactivate(&self, surface: &mut dyn EditorSurface) {
        let removed = surface.keymaps_mut().remove_all(self.keymap.id());
        if removed > 0 {
            debug!(surface = %surface.id(), removed, "deactivated overlay");
        }
    }
}

/// Mode-change observer that keeps the overlay and the terminal cursor in
/// step with the editor's mode.
#[derive(Debug)]
pub struct ModeSync {
    overlay: ModeOverlay,
    bridge: PositionBridge,
}

impl ModeSync {
    pub fn new(overlay: ModeOverlay, bridge: PositionBridge) -> Self {
        Self { overlay, bridge }
    }
}

impl ModeObserver for ModeSync {
    fn mode_changed(&self, surface: &mut dyn EditorSurface, change: ModeChange) {
        if change.entered(EditorMode::Insert) {
            self.bridge.sync(surface);
        }
        if change.entered(self.overlay.source_mode()) {
            if let Err(err) = self.overlay.activate(surface) {
                warn!(surface = %surface.id(), %err, "overlay not activated");
            }
        } else if change.left(self.overlay.source_mode()) {
            self.overlay.deactivate(surface);
        }
    }
}
