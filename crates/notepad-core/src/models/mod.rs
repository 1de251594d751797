//! Data models for Notepad

mod details;
mod note;
mod timestamp;

pub use details::{NoteDetailsArgs, NoteDetailsType};
pub use note::{Note, NoteId};
pub use timestamp::Timestamp;
