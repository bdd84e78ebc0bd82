//! modeterm-core - keeps a modal line editor and a terminal session in step.
//!
//! The core adapts between two collaborators it does not own: an
//! [`EditorSurface`] (modes, keymaps, cursor) and its [`TerminalSession`].
//! [`TerminalIntegration::enable`] installs, per surface:
//! - a TERMINAL mode whose keymap falls back to NORMAL,
//! - an exit-insert interceptor that lands in TERMINAL instead of NORMAL,
//! - an overlay of remapped/terminal-specific bindings active only in TERMINAL,
//! - cursor syncing into the terminal on the relevant transitions.

pub mod bridge;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod hook;
pub mod integration;
pub mod interceptor;
pub mod keymap;
pub mod keys;
pub mod mode;
pub mod overlay;
pub mod remap;
pub mod surface;
pub mod terminal_mode;

pub use bridge::PositionBridge;
pub use command::{Command, CommandId, TerminalCommands};
pub use dispatch::{KeyOutcome, dispatch_key};
pub use error::{Error, Result};
pub use hook::HookPoint;
pub use integration::{IntegrationConfig, TerminalIntegration};
pub use keymap::{Binding, Keymap, KeymapChain, KeymapId};
pub use keys::KeyCombo;
pub use mode::{EditorMode, ModeChange};
pub use overlay::{ModeOverlay, ModeSync};
pub use remap::{RemapEntry, RemapTable, SyncPolicy};
pub use surface::{
    EditorSurface, ExitInsert, ModeObserver, NormalLike, Position, SubscriptionId, SurfaceId,
    TerminalSession,
};
