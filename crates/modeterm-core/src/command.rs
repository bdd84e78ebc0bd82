//! Command identifiers and the terminal-native command catalog.

use std::collections::BTreeMap;
use std::fmt;

use crate::keys::KeyCombo;

/// Identifier of a command in either the editor or the terminal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(String);

impl CommandId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CommandId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// What a key binding invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A native editor command, run by the surface.
    Editor(CommandId),
    /// A terminal-native command, sent to the session as a key sequence.
    Terminal(CommandId),
    /// Generated wrapper: push the editor position into the terminal, then run
    /// the editor command.
    SyncThenDelegate(CommandId),
}

impl Command {
    pub fn editor(name: impl Into<String>) -> Self {
        Self::Editor(CommandId::new(name))
    }

    pub fn terminal(name: impl Into<String>) -> Self {
        Self::Terminal(CommandId::new(name))
    }

    pub fn id(&self) -> &CommandId {
        match self {
            Self::Editor(id) | Self::Terminal(id) | Self::SyncThenDelegate(id) => id,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor(id) => write!(f, "{}", id),
            Self::Terminal(id) => write!(f, "{}", id),
            Self::SyncThenDelegate(id) => write!(f, "sync+{}", id),
        }
    }
}

/// Terminal-native commands the session understands, each expanding to the
/// key sequence sent to the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalCommands {
    commands: BTreeMap<CommandId, Vec<KeyCombo>>,
}

pub const SEND_RETURN: &str = "terminal-send-return";
pub const UNDO: &str = "terminal-undo";
pub const KILL_LINE: &str = "terminal-kill-line";
pub const YANK: &str = "terminal-yank";
pub const INTERRUPT: &str = "terminal-interrupt";
pub const EOF: &str = "terminal-eof";
pub const SEND_TAB: &str = "terminal-send-tab";
pub const CLEAR: &str = "terminal-clear";

impl TerminalCommands {
    pub fn empty() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register (or replace) a terminal command.
    pub fn insert(&mut self, id: impl Into<CommandId>, sequence: Vec<KeyCombo>) {
        self.commands.insert(id.into(), sequence);
    }

    pub fn recognizes(&self, id: &CommandId) -> bool {
        self.commands.contains_key(id)
    }

    pub fn sequence(&self, id: &CommandId) -> Option<&[KeyCombo]> {
        self.commands.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CommandId> {
        self.commands.keys()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for TerminalCommands {
    fn default() -> Self {
        use crossterm::event::KeyCode;

        let mut commands = Self::empty();
        commands.insert(SEND_RETURN, vec![KeyCombo::plain(KeyCode::Enter)]);
        commands.insert(UNDO, vec![KeyCombo::ctrl('_')]);
        commands.insert(KILL_LINE, vec![KeyCombo::ctrl('k')]);
        commands.insert(YANK, vec![KeyCombo::ctrl('y')]);
        commands.insert(INTERRUPT, vec![KeyCombo::ctrl('c')]);
        commands.insert(EOF, vec![KeyCombo::ctrl('d')]);
        commands.insert(SEND_TAB, vec![KeyCombo::plain(KeyCode::Tab)]);
        commands.insert(CLEAR, vec![KeyCombo::ctrl('l')]);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_knows_shipped_commands() {
        let catalog = TerminalCommands::default();
        for id in [SEND_RETURN, UNDO, KILL_LINE, YANK, INTERRUPT, EOF, SEND_TAB, CLEAR] {
            assert!(catalog.recognizes(&CommandId::from(id)), "{id}");
        }
        assert!(!catalog.recognizes(&CommandId::from("terminal-teleport")));
    }

    #[test]
    fn undo_sends_ctrl_underscore() {
        let catalog = TerminalCommands::default();
        assert_eq!(
            catalog.sequence(&CommandId::from(UNDO)),
            Some(&[KeyCombo::ctrl('_')][..])
        );
    }

    #[test]
    fn insert_replaces_existing_sequence() {
        let mut catalog = TerminalCommands::default();
        catalog.insert(CLEAR, vec![KeyCombo::ctrl('l'), KeyCombo::ctrl('l')]);
        assert_eq!(catalog.sequence(&CommandId::from(CLEAR)).map(<[_]>::len), Some(2));
    }
}
