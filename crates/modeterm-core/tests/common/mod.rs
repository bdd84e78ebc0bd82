//! In-memory editor surface and terminal session for driving the core.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::KeyCode;
use modeterm_core::{
    Command, CommandId, EditorMode, EditorSurface, ExitInsert, HookPoint, KeyCombo, Keymap,
    KeymapChain, ModeChange, ModeObserver, NormalLike, Position, SubscriptionId, SurfaceId,
    TerminalSession,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Cursor(Position),
    Key(KeyCombo),
    Run(String),
    ExitKeypad,
    StopMacro,
    MacroExit,
    Mode(ModeChange),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct RecordingTerminal {
    events: EventLog,
}

impl TerminalSession for RecordingTerminal {
    fn set_cursor(&mut self, position: Position) {
        self.events.borrow_mut().push(Event::Cursor(position));
    }

    fn send_key(&mut self, key: &KeyCombo) {
        self.events.borrow_mut().push(Event::Key(*key));
    }
}

/// The editor's own exit-insert: always lands in NORMAL.
pub struct NativeExitInsert;

impl ExitInsert for NativeExitInsert {
    fn exit_insert(&self, surface: &mut dyn EditorSurface) {
        if surface.mode() == EditorMode::Keypad {
            surface.exit_keypad();
        } else {
            surface.switch_mode(EditorMode::Normal);
        }
    }
}

pub struct NativeNormalLike;

impl NormalLike for NativeNormalLike {
    fn is_normal_like(&self, surface: &dyn EditorSurface) -> bool {
        matches!(surface.mode(), EditorMode::Normal | EditorMode::Motion)
    }
}

/// NORMAL bindings of the fake editor.
pub fn normal_keymap() -> Keymap {
    Keymap::new("normal")
        .with(KeyCombo::char('u'), Command::editor("undo"))
        .with(KeyCombo::char('x'), Command::editor("kill-line"))
        .with(KeyCombo::char('h'), Command::editor("left"))
        .with(KeyCombo::char('l'), Command::editor("right"))
        .with(KeyCombo::char('i'), Command::editor("insert"))
        .with(KeyCombo::char('/'), Command::editor("search"))
}

pub struct FakeSurface {
    id: SurfaceId,
    mode: EditorMode,
    pub position: Position,
    terminal: Option<RecordingTerminal>,
    chain: KeymapChain,
    pub normal: Arc<Keymap>,
    exit_hook: HookPoint<dyn ExitInsert>,
    normal_like_hook: HookPoint<dyn NormalLike>,
    observers: Vec<(SubscriptionId, Arc<dyn ModeObserver>)>,
    next_subscription: u64,
    pub quick_macro: bool,
    pub events: EventLog,
}

impl FakeSurface {
    fn build(id: u64, terminal_backed: bool) -> Self {
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let normal = Arc::new(normal_keymap());
        let mut chain = KeymapChain::new();
        chain.set_mode_keymap(EditorMode::Normal, Some(Arc::clone(&normal)));
        let terminal = terminal_backed.then(|| {
            chain.set_base(Some(Arc::new(
                Keymap::new("terminal-base")
                    .with(KeyCombo::ctrl('c'), Command::terminal("terminal-interrupt")),
            )));
            RecordingTerminal {
                events: Rc::clone(&events),
            }
        });
        Self {
            id: SurfaceId(id),
            mode: EditorMode::Normal,
            position: Position(10),
            terminal,
            chain,
            normal,
            exit_hook: HookPoint::new(Arc::new(NativeExitInsert)),
            normal_like_hook: HookPoint::new(Arc::new(NativeNormalLike)),
            observers: Vec::new(),
            next_subscription: 0,
            quick_macro: false,
            events,
        }
    }

    pub fn terminal_backed() -> Self {
        Self::build(1, true)
    }

    /// A second terminal-backed surface, distinct from `terminal_backed()`.
    pub fn another_terminal_backed() -> Self {
        Self::build(3, true)
    }

    pub fn plain() -> Self {
        Self::build(2, false)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn cursor_syncs(&self) -> Vec<Position> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Cursor(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Force a mode without going through observers' decision logic.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.switch_mode(mode);
    }
}

impl EditorSurface for FakeSurface {
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
        self.events.borrow_mut().push(Event::Mode(change));
        let observers: Vec<_> = self.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
        for observer in observers {
            observer.mode_changed(self, change);
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn terminal(&self) -> Option<&dyn TerminalSession> {
        self.terminal.as_ref().map(|t| t as &dyn TerminalSession)
    }

    fn terminal_mut(&mut self) -> Option<&mut dyn TerminalSession> {
        self.terminal.as_mut().map(|t| t as &mut dyn TerminalSession)
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
        self.events.borrow_mut().push(Event::ExitKeypad);
        self.switch_mode(EditorMode::Normal);
    }

    fn is_recording_quick_macro(&self) -> bool {
        self.quick_macro
    }

    fn stop_quick_macro(&mut self) {
        self.quick_macro = false;
        self.events.borrow_mut().push(Event::StopMacro);
    }

    fn macro_insert_exit(&mut self) {
        self.events.borrow_mut().push(Event::MacroExit);
        self.switch_mode(EditorMode::Normal);
    }

    fn run_command(&mut self, command: &CommandId) {
        self.events
            .borrow_mut()
            .push(Event::Run(command.as_str().to_string()));
        match command.as_str() {
            "left" => self.position = Position(self.position.0.saturating_sub(1)),
            "right" => self.position = Position(self.position.0 + 1),
            "insert" => self.switch_mode(EditorMode::Insert),
            _ => {}
        }
    }
}

pub fn enter() -> KeyCombo {
    KeyCombo::plain(KeyCode::Enter)
}
