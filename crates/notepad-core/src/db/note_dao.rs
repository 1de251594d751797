//! Note table access

use rusqlite::{params, Connection};

use super::row::{NoteRow, NOTE_COLUMNS};
use crate::error::{Error, Result};
use crate::models::{Note, NoteId};

/// Trait for note storage operations
pub trait NoteDao {
    /// Insert the note, or replace the row with the same id. Returns the row id.
    fn upsert(&self, note: &Note) -> Result<NoteId>;

    /// Overwrite an existing row without inserting.
    ///
    /// Saves from a screen go through [`Self::upsert`]; this is for callers
    /// that must fail when the note is gone.
    fn update(&self, note: &Note) -> Result<()>;

    /// All notes, most recently touched first
    fn get_all(&self) -> Result<Vec<Note>>;

    /// Get a note by ID
    fn get_by_id(&self, id: NoteId) -> Result<Option<Note>>;

    /// Delete a note by ID
    fn delete_by_id(&self, id: NoteId) -> Result<()>;
}

/// `SQLite` implementation of `NoteDao`
pub struct SqliteNoteDao<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteDao<'a> {
    /// Create a new DAO with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl NoteDao for SqliteNoteDao<'_> {
    fn upsert(&self, note: &Note) -> Result<NoteId> {
        let row = NoteRow::from(note);

        // create_date is never rewritten and a stored modify_date is never cleared
        let id: i64 = self.conn.query_row(
            "INSERT INTO notes (id, title, content, photo_url, create_date, modify_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 content = excluded.content,
                 photo_url = excluded.photo_url,
                 modify_date = COALESCE(excluded.modify_date, notes.modify_date)
             RETURNING id",
            params![
                row.id,
                row.title,
                row.content,
                row.photo_url,
                row.create_date,
                row.modify_date
            ],
            |r| r.get(0),
        )?;

        Ok(NoteId::new(id))
    }

    fn update(&self, note: &Note) -> Result<()> {
        if !note.id.is_set() {
            return Err(Error::InvalidInput("Cannot update an unsaved note".into()));
        }

        let row = NoteRow::from(note);
        let rows = self.conn.execute(
            "UPDATE notes
             SET title = ?1, content = ?2, photo_url = ?3,
                 modify_date = COALESCE(?4, modify_date)
             WHERE id = ?5",
            params![
                row.title,
                row.content,
                row.photo_url,
                row.modify_date,
                row.id
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(note.id.to_string()));
        }

        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             ORDER BY COALESCE(modify_date, create_date) DESC, id DESC"
        ))?;

        let notes = stmt
            .query_map([], NoteRow::from_row)?
            .map(|row| row.map(Note::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    fn get_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        let result = self.conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
            params![id.get()],
            NoteRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.into())),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_by_id(&self, id: NoteId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", params![id.get()])?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
