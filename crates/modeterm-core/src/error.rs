//! Error types for the modeterm core.

use thiserror::Error;

/// Errors surfaced by the synchronization core.
///
/// Idempotent operations (double activation, syncing a plain surface, ...)
/// never produce an error; only the kinds below reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation that needs a terminal-backed surface was invoked on a
    /// surface without a terminal session.
    #[error("{operation} requires a terminal-backed surface (surface {surface})")]
    Precondition {
        surface: String,
        operation: &'static str,
    },

    /// The remap configuration references something the terminal side does
    /// not know about.
    #[error("invalid remap entry '{entry}': {reason}")]
    Configuration { entry: String, reason: String },

    /// Enable or disable would leave a surface with a partial or doubled
    /// integration.
    #[error("{reason} (surface {surface})")]
    Lifecycle { surface: String, reason: String },

    #[error("invalid key '{input}': {reason}")]
    KeyParse { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
