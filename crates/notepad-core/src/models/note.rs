//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::Timestamp;

/// Storage-assigned note identifier. `0` means the note has not been persisted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Identifier of a note that storage has not seen yet
    pub const UNSET: Self = Self(0);

    /// Wrap a raw row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether storage has assigned this id
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Row identifier, [`NoteId::UNSET`] until first save
    pub id: NoteId,
    /// Title shown in lists; the controller keeps it non-empty
    pub title: String,
    /// Body text
    pub content: Option<String>,
    /// Photo location handed to the image loader
    pub photo_url: Option<String>,
    /// Set once when the note is first saved
    pub create_date: Timestamp,
    /// Time of the latest edit, absent until the first edit
    pub modify_date: Option<Timestamp>,
}

impl Note {
    /// Create an unsaved note
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: Option<String>,
        photo_url: Option<String>,
        create_date: Timestamp,
    ) -> Self {
        Self {
            id: NoteId::UNSET,
            title: title.into(),
            content,
            photo_url,
            create_date,
            modify_date: None,
        }
    }

    /// Whether the note has a stored row
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_set()
    }

    /// Whether a non-empty photo URL is attached
    #[must_use]
    pub fn has_photo(&self) -> bool {
        self.photo_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Latest of the create and modify timestamps
    #[must_use]
    pub fn last_touched(&self) -> Timestamp {
        self.modify_date.unwrap_or(self.create_date)
    }

    /// Get the title truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.title.chars().take(max_len).collect()
    }
}
