//! Per-screen UI state

use crate::models::Note;

/// Which flow the note details screen is in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Freshly opened, entry args not applied yet
    #[default]
    Initial,
    /// Read-only view of a saved note
    Viewing,
    /// Composing a new note
    Adding,
    /// Editing a saved note
    Editing,
}

impl Mode {
    /// Whether `save` is accepted in this mode
    pub const fn can_save(self) -> bool {
        matches!(self, Self::Adding | Self::Editing)
    }
}

/// Ephemeral state of one screen instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub mode: Mode,
    /// Working photo URL, committed to the note only on save
    pub photo_url: Option<String>,
    /// Note being viewed or edited, `None` while adding
    pub note: Option<Note>,
}

/// Completion signal of a save started by the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEvent {
    NoteSaved,
    SaveFailed { message: String },
}
