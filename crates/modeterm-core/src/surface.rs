//! Interfaces of the two collaborators the core adapts between.
//!
//! The editor and the terminal session are owned by the host; the core only
//! talks to them through these traits.

use std::fmt;
use std::sync::Arc;

use crate::command::CommandId;
use crate::hook::HookPoint;
use crate::keymap::{Keymap, KeymapChain};
use crate::keys::KeyCombo;
use crate::mode::{EditorMode, ModeChange};

/// Offset of the editor's cursor in the current buffer/session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The terminal session backing a surface. Both operations are synchronous
/// and side-effect only.
pub trait TerminalSession {
    fn set_cursor(&mut self, position: Position);
    fn send_key(&mut self, key: &KeyCombo);
}

/// The editor's "leave insert mode" entry point.
pub trait ExitInsert: Send + Sync {
    fn exit_insert(&self, surface: &mut dyn EditorSurface);
}

/// The editor's "is the current mode normal-like" predicate.
pub trait NormalLike: Send + Sync {
    fn is_normal_like(&self, surface: &dyn EditorSurface) -> bool;
}

/// Receives mode transitions of a surface.
pub trait ModeObserver: Send + Sync {
    fn mode_changed(&self, surface: &mut dyn EditorSurface, change: ModeChange);
}

/// An editing surface of the modal editor.
pub trait EditorSurface {
    fn id(&self) -> SurfaceId;

    fn mode(&self) -> EditorMode;

    /// Switch to `mode`. Implementations must notify every subscribed
    /// [`ModeObserver`] once the new mode is in place, and must not notify
    /// when `mode` is already active.
    fn switch_mode(&mut self, mode: EditorMode);

    fn position(&self) -> Position;

    /// Capability test: the terminal session, if this surface has one.
    fn terminal(&self) -> Option<&dyn TerminalSession>;

    fn terminal_mut(&mut self) -> Option<&mut dyn TerminalSession>;

    fn is_terminal_backed(&self) -> bool {
        self.terminal().is_some()
    }

    fn keymaps(&self) -> &KeymapChain;

    fn keymaps_mut(&mut self) -> &mut KeymapChain;

    /// Snapshot of the editor's native NORMAL-mode bindings.
    fn normal_keymap(&self) -> Arc<Keymap>;

    fn exit_insert_hook(&self) -> &HookPoint<dyn ExitInsert>;

    fn exit_insert_hook_mut(&mut self) -> &mut HookPoint<dyn ExitInsert>;

    fn normal_like_hook(&self) -> &HookPoint<dyn NormalLike>;

    fn normal_like_hook_mut(&mut self) -> &mut HookPoint<dyn NormalLike>;

    fn subscribe(&mut self, observer: Arc<dyn ModeObserver>) -> SubscriptionId;

    /// Returns `false` when `id` was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Leave the keypad (chord building) state.
    fn exit_keypad(&mut self);

    fn is_recording_quick_macro(&self) -> bool;

    fn stop_quick_macro(&mut self);

    /// The editor's macro-aware variant of leaving insert mode.
    fn macro_insert_exit(&mut self);

    /// Run a native editor command.
    fn run_command(&mut self, command: &CommandId);
}

/// Leave insert mode through whichever handler is currently installed.
pub fn exit_insert(surface: &mut dyn EditorSurface) {
    let handler = surface.exit_insert_hook().current();
    handler.exit_insert(surface);
}

/// The editor's normal-like predicate, including installed extensions.
pub fn is_normal_like(surface: &dyn EditorSurface) -> bool {
    surface.normal_like_hook().current().is_normal_like(surface)
}
