//! Entry parameters for the note details screen

use serde::{Deserialize, Serialize};

use super::Note;
use crate::error::Result;

/// How the note details screen should open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteDetailsType {
    /// Blank screen for a new note
    Add,
    /// Read-only view of an existing note
    View,
}

/// Arguments passed to a note details screen when it is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetailsArgs {
    pub mode: NoteDetailsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

impl NoteDetailsArgs {
    /// Open a blank screen
    #[must_use]
    pub const fn add() -> Self {
        Self {
            mode: NoteDetailsType::Add,
            note: None,
        }
    }

    /// Open an existing note
    #[must_use]
    pub const fn view(note: Note) -> Self {
        Self {
            mode: NoteDetailsType::View,
            note: Some(note),
        }
    }

    /// Serialize for handing across a navigation boundary
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse arguments produced by [`Self::to_json`]
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
