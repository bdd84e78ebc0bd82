use crossterm::event::KeyCode;
use modeterm_core::{Command, KeyCombo, Keymap, command};

pub(crate) const LEFT: &str = "left";
pub(crate) const RIGHT: &str = "right";
pub(crate) const LINE_START: &str = "line-start";
pub(crate) const LINE_END: &str = "line-end";
pub(crate) const WORD_FORWARD: &str = "word-forward";
pub(crate) const WORD_BACKWARD: &str = "word-backward";
pub(crate) const INSERT: &str = "insert";
pub(crate) const APPEND: &str = "append";
pub(crate) const UNDO: &str = "undo";
pub(crate) const KILL_LINE: &str = "kill-line";
pub(crate) const YANK: &str = "yank";
pub(crate) const DELETE_CHAR: &str = "delete-char";
pub(crate) const KEYPAD: &str = "keypad";
pub(crate) const QUICK_MACRO: &str = "quick-macro";

/// NORMAL-mode bindings of the playground editor.
pub(crate) fn playground_normal_keymap() -> Keymap {
    let bindings: [(KeyCombo, &str); 18] = [
        (KeyCombo::char('h'), LEFT),
        (KeyCombo::plain(KeyCode::Left), LEFT),
        (KeyCombo::char('l'), RIGHT),
        (KeyCombo::plain(KeyCode::Right), RIGHT),
        (KeyCombo::char('0'), LINE_START),
        (KeyCombo::plain(KeyCode::Home), LINE_START),
        (KeyCombo::char('$'), LINE_END),
        (KeyCombo::plain(KeyCode::End), LINE_END),
        (KeyCombo::char('w'), WORD_FORWARD),
        (KeyCombo::char('b'), WORD_BACKWARD),
        (KeyCombo::char('i'), INSERT),
        (KeyCombo::char('a'), APPEND),
        (KeyCombo::char('u'), UNDO),
        (KeyCombo::char('D'), KILL_LINE),
        (KeyCombo::char('p'), YANK),
        (KeyCombo::char('x'), DELETE_CHAR),
        (KeyCombo::char(' '), KEYPAD),
        (KeyCombo::char('Q'), QUICK_MACRO),
    ];
    bindings
        .into_iter()
        .fold(Keymap::new("normal"), |keymap, (combo, name)| {
            keymap.with(combo, Command::editor(name))
        })
}

/// Bindings the simulated terminal session handles on its own.
pub(crate) fn playground_base_keymap() -> Keymap {
    Keymap::new("terminal-base")
        .with(KeyCombo::ctrl('c'), Command::terminal(command::INTERRUPT))
        .with(KeyCombo::ctrl('l'), Command::terminal(command::CLEAR))
        .with(KeyCombo::ctrl('d'), Command::terminal(command::EOF))
}
