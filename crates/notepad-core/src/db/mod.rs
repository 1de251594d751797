//! Database layer for Notepad

mod connection;
mod migrations;
mod note_dao;
mod row;

pub use connection::{Database, NOTE_DATABASE_NAME};
pub use note_dao::{NoteDao, SqliteNoteDao};
