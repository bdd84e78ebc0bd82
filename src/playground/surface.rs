//! The playground's editing surface: a one-line modal editor that is either
//! backed by the simulated shell or edits its own line.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use modeterm_core::{
    CommandId, EditorMode, EditorSurface, ExitInsert, HookPoint, KeyCombo, Keymap, KeymapChain,
    ModeChange, ModeObserver, NormalLike, Position, SubscriptionId, SurfaceId, TerminalSession,
};
use tracing::debug;

use super::line::LineBuffer;
use super::shell::ShellSession;
use crate::config::defaults::{self, playground_base_keymap, playground_normal_keymap};

/// The editor's own "leave insert" handler.
struct NativeExitInsert;

impl ExitInsert for NativeExitInsert {
    fn exit_insert(&self, surface: &mut dyn EditorSurface) {
        match surface.mode() {
            EditorMode::Keypad => surface.exit_keypad(),
            EditorMode::Insert if surface.is_recording_quick_macro() => {
                surface.stop_quick_macro();
                surface.macro_insert_exit();
            }
            _ => surface.switch_mode(EditorMode::Normal),
        }
    }
}

struct NativeNormalLike;

impl NormalLike for NativeNormalLike {
    fn is_normal_like(&self, surface: &dyn EditorSurface) -> bool {
        matches!(surface.mode(), EditorMode::Normal | EditorMode::Motion)
    }
}

pub struct PlaygroundSurface {
    id: SurfaceId,
    mode: EditorMode,
    point: usize,
    line: LineBuffer,
    session: Option<ShellSession>,
    chain: KeymapChain,
    normal: Arc<Keymap>,
    exit_hook: HookPoint<dyn ExitInsert>,
    normal_like_hook: HookPoint<dyn NormalLike>,
    observers: Vec<(SubscriptionId, Arc<dyn ModeObserver>)>,
    next_subscription: u64,
    quick_macro: bool,
    status: Option<String>,
}

impl PlaygroundSurface {
    pub fn new(terminal_backed: bool) -> Self {
        let normal = Arc::new(playground_normal_keymap());
        let mut chain = KeymapChain::new();
        chain.set_mode_keymap(EditorMode::Normal, Some(Arc::clone(&normal)));
        let session = terminal_backed.then(|| {
            chain.set_base(Some(Arc::new(playground_base_keymap())));
            ShellSession::new()
        });
        Self {
            id: SurfaceId(1),
            mode: EditorMode::Normal,
            point: 0,
            line: LineBuffer::default(),
            session,
            chain,
            normal,
            exit_hook: HookPoint::new(Arc::new(NativeExitInsert)),
            normal_like_hook: HookPoint::new(Arc::new(NativeNormalLike)),
            observers: Vec::new(),
            next_subscription: 0,
            quick_macro: false,
            status: None,
        }
    }

    /// Text under the editor's point: the prompt line or the own line.
    pub fn text(&self) -> &str {
        match &self.session {
            Some(session) => session.input(),
            None => self.line.text(),
        }
    }

    pub fn point(&self) -> usize {
        self.point
    }

    pub fn session(&self) -> Option<&ShellSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    fn move_point(&mut self, point: usize) {
        self.point = point.min(self.text_len());
    }

    /// Feed a key typed in INSERT mode.
    ///
    /// Terminal-backed surfaces pass it straight to the session and follow its
    /// cursor; plain surfaces edit their own line.
    pub fn insert_key(&mut self, key: KeyCombo) {
        if let Some(session) = self.session.as_mut() {
            session.send_key(&key);
            self.point = session.cursor();
            return;
        }
        self.line.set_cursor(self.point);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if plain => self.line.insert_char(ch),
            KeyCode::Backspace => self.line.backspace(),
            KeyCode::Delete => self.line.delete_char(),
            KeyCode::Left => self.line.set_cursor(self.point.saturating_sub(1)),
            KeyCode::Right => self.line.set_cursor(self.point + 1),
            _ => self.set_status(format!("{} is undefined in INSERT", key)),
        }
        self.point = self.line.cursor();
    }

    /// Native editing commands, refused on the read-only terminal buffer.
    fn edit(&mut self, command: &str) {
        if self.session.is_some() {
            self.set_status("Buffer is read-only");
            return;
        }
        self.line.set_cursor(self.point);
        match command {
            defaults::UNDO => {
                if !self.line.undo() {
                    self.set_status("No further undo information");
                }
            }
            defaults::KILL_LINE => self.line.kill_line(),
            defaults::YANK => self.line.yank(),
            _ => self.line.delete_char(),
        }
        self.point = self.line.cursor();
    }
}

impl EditorSurface for PlaygroundSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn mode(&self) -> EditorMode {
        self.mode
    }

    fn switch_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        let change = ModeChange {
            from: self.mode,
            to: mode,
        };
        self.mode = mode;
        debug!(from = %change.from, to = %change.to, "mode switched");
        let observers: Vec<_> = self
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.mode_changed(self, change);
        }
    }

    fn position(&self) -> Position {
        Position(self.point)
    }

    fn terminal(&self) -> Option<&dyn TerminalSession> {
        self.session.as_ref().map(|s| s as &dyn TerminalSession)
    }

    fn terminal_mut(&mut self) -> Option<&mut dyn TerminalSession> {
        self.session.as_mut().map(|s| s as &mut dyn TerminalSession)
    }

    fn keymaps(&self) -> &KeymapChain {
        &self.chain
    }

    fn keymaps_mut(&mut self) -> &mut KeymapChain {
        &mut self.chain
    }

    fn normal_keymap(&self) -> Arc<Keymap> {
        Arc::clone(&self.normal)
    }

    fn exit_insert_hook(&self) -> &HookPoint<dyn ExitInsert> {
        &self.exit_hook
    }

    fn exit_insert_hook_mut(&mut self) -> &mut HookPoint<dyn ExitInsert> {
        &mut self.exit_hook
    }

    fn normal_like_hook(&self) -> &HookPoint<dyn NormalLike> {
        &self.normal_like_hook
    }

    fn normal_like_hook_mut(&mut self) -> &mut HookPoint<dyn NormalLike> {
        &mut self.normal_like_hook
    }

    fn subscribe(&mut self, observer: Arc<dyn ModeObserver>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, observer));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        before != self.observers.len()
    }

    fn exit_keypad(&mut self) {
        self.switch_mode(EditorMode::Normal);
    }

    fn is_recording_quick_macro(&self) -> bool {
        self.quick_macro
    }

    fn stop_quick_macro(&mut self) {
        self.quick_macro = false;
    }

    fn macro_insert_exit(&mut self) {
        self.set_status("Quick macro recorded");
        self.switch_mode(EditorMode::Normal);
    }

    fn run_command(&mut self, command: &CommandId) {
        let point = self.point;
        match command.as_str() {
            defaults::LEFT => self.move_point(point.saturating_sub(1)),
            defaults::RIGHT => self.move_point(point + 1),
            defaults::LINE_START => self.move_point(0),
            defaults::LINE_END => self.move_point(usize::MAX),
            defaults::WORD_FORWARD | defaults::WORD_BACKWARD => {
                let line = match &self.session {
                    Some(session) => session.prompt(),
                    None => &self.line,
                };
                let target = if command.as_str() == defaults::WORD_FORWARD {
                    line.word_forward(point)
                } else {
                    line.word_backward(point)
                };
                self.move_point(target);
            }
            defaults::INSERT => self.switch_mode(EditorMode::Insert),
            defaults::APPEND => {
                self.move_point(point + 1);
                self.switch_mode(EditorMode::Insert);
            }
            defaults::KEYPAD => self.switch_mode(EditorMode::Keypad),
            defaults::QUICK_MACRO => {
                self.quick_macro = !self.quick_macro;
                if self.quick_macro {
                    self.set_status("Recording quick macro");
                } else {
                    self.set_status("Quick macro recorded");
                }
            }
            defaults::UNDO | defaults::KILL_LINE | defaults::YANK | defaults::DELETE_CHAR => {
                self.edit(command.as_str())
            }
            other => self.set_status(format!("Unknown command: {}", other)),
        }
    }
}
