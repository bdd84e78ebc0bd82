//! Error types for the modeterm binary

use thiserror::Error;

/// Errors that can occur in the modeterm application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] modeterm_core::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
