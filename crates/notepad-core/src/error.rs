//! Error types for notepad-core

use thiserror::Error;

use crate::screen::Mode;

/// Result type alias using notepad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notepad-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A screen operation was requested from a mode that does not allow it
    #[error("Cannot {action} while in {mode:?} mode")]
    InvalidTransition {
        /// Requested operation
        action: &'static str,
        /// Mode the screen was in
        mode: Mode,
    },

    /// A save for this screen has not completed yet
    #[error("A save is already in progress")]
    SaveInProgress,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Background task failed to run to completion
    #[error("Executor error: {0}")]
    Executor(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Executor(error.to_string())
    }
}
