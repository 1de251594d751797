use std::io;

use notepad_core::screen::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notepad_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Invalid note id: {0}")]
    InvalidNoteId(String),
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    SaveFailed(String),
    #[error("Nothing to change; pass --title, --content, --photo or --remove-photo")]
    NothingToEdit,
    #[error("Note {0} has no content; pass --content")]
    ContentRequired(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
