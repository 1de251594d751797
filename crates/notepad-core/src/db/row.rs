//! Mapping between `Note` and rows of the `notes` table

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;

use crate::models::{Note, NoteId, Timestamp};

/// Column list in the order [`NoteRow::from_row`] reads them
pub const NOTE_COLUMNS: &str = "id, title, content, photo_url, create_date, modify_date";

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_millis()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self::from_millis)
    }
}

/// One row of the `notes` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    /// `None` lets `SQLite` assign the next id
    pub id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    pub photo_url: Option<String>,
    pub create_date: Timestamp,
    pub modify_date: Option<Timestamp>,
}

impl NoteRow {
    /// Read a row selected with [`NOTE_COLUMNS`]
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            photo_url: row.get(3)?,
            create_date: row.get(4)?,
            modify_date: row.get(5)?,
        })
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.is_set().then(|| note.id.get()),
            title: note.title.clone(),
            content: note.content.clone(),
            photo_url: note.photo_url.clone(),
            create_date: note.create_date,
            modify_date: note.modify_date,
        }
    }
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id.map_or(NoteId::UNSET, NoteId::new),
            title: row.title,
            content: row.content,
            photo_url: row.photo_url,
            create_date: row.create_date,
            modify_date: row.modify_date,
        }
    }
}
