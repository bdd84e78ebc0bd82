//! The TERMINAL mode: NORMAL's keymap as parent, recognized as normal-like.

use std::sync::Arc;

use crate::keymap::Keymap;
use crate::mode::EditorMode;
use crate::surface::{EditorSurface, NormalLike};

pub const TERMINAL_KEYMAP: &str = "terminal";

/// TERMINAL's own keymap: empty, falling back to the NORMAL snapshot.
pub fn terminal_keymap(normal: Arc<Keymap>) -> Keymap {
    Keymap::with_parent(TERMINAL_KEYMAP, normal)
}

/// Extends the editor's normal-like predicate so TERMINAL counts as well.
pub struct TerminalNormalLike {
    original: Arc<dyn NormalLike>,
}

impl TerminalNormalLike {
    pub fn new(original: Arc<dyn NormalLike>) -> Self {
        Self { original }
    }
}

impl NormalLike for TerminalNormalLike {
    fn is_normal_like(&self, surface: &dyn EditorSurface) -> bool {
        self.original.is_normal_like(surface) || surface.mode() == EditorMode::Terminal
    }
}
