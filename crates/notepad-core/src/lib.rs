//! notepad-core - Core library for Notepad
//!
//! This crate contains the note model, the `SQLite` storage layer, the async
//! note repository, and the per-screen state machine and controller that drive
//! the add/view/edit flow.

pub mod clock;
pub mod db;
pub mod error;
pub mod executor;
pub mod models;
pub mod repository;
pub mod screen;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteDetailsArgs, NoteDetailsType, NoteId, Timestamp};
