/// Modal editing state of an editing surface.
///
/// Exactly one mode is active per surface. Every mode except
/// [`Terminal`](EditorMode::Terminal) belongs to the editor itself; `Terminal`
/// is added by the integration and is only entered from `Insert` on a
/// terminal-backed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Navigation and single-key commands.
    #[default]
    Normal,
    /// Text entry.
    Insert,
    /// Building a key chord (leader/prefix sequences).
    Keypad,
    /// Motion-only mode used by special buffers.
    Motion,
    /// Acting on behalf of the terminal session, layered over `Normal`.
    Terminal,
}

impl EditorMode {
    pub const ALL: [EditorMode; 5] = [
        EditorMode::Normal,
        EditorMode::Insert,
        EditorMode::Keypad,
        EditorMode::Motion,
        EditorMode::Terminal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Keypad => "KEYPAD",
            Self::Motion => "MOTION",
            Self::Terminal => "TERMINAL",
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert)
    }
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A mode transition reported to [`ModeObserver`](crate::ModeObserver)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: EditorMode,
    pub to: EditorMode,
}

impl ModeChange {
    pub fn entered(&self, mode: EditorMode) -> bool {
        self.to == mode && self.from != mode
    }

    pub fn left(&self, mode: EditorMode) -> bool {
        self.from == mode && self.to != mode
    }
}
