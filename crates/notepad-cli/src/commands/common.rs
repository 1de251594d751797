use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use notepad_core::clock::SystemClock;
use notepad_core::db::Database;
use notepad_core::executor::Executor;
use notepad_core::repository::{LocalNoteRepository, NoteRepository};
use notepad_core::screen::{
    NoteScreenController, NoteViewModel, PhotoPrompt, SaveOutcome, ScreenEvent,
};
use notepad_core::{Note, NoteDetailsArgs, NoteId};
use serde::Serialize;

use crate::error::CliError;

pub type Screen = NoteScreenController<LocalNoteRepository>;

/// Settings every command runs with
#[derive(Debug, Clone)]
pub struct AppContext {
    pub db_path: PathBuf,
    pub date_time_format: String,
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub photo_url: Option<String>,
    pub create_date: i64,
    pub modify_date: Option<i64>,
    pub relative_time: String,
}

pub fn open_repository(db_path: &Path) -> Result<Arc<LocalNoteRepository>, CliError> {
    let db = Database::open(db_path)?;
    Ok(Arc::new(LocalNoteRepository::new(db, Executor::current()?)))
}

pub fn open_screen(
    repo: &Arc<LocalNoteRepository>,
    args: NoteDetailsArgs,
    ctx: &AppContext,
) -> Result<Screen, CliError> {
    let view_model = NoteViewModel::new(
        Arc::clone(repo),
        Executor::current()?,
        Arc::new(SystemClock),
    );
    Ok(NoteScreenController::new(view_model, args)
        .with_date_time_format(ctx.date_time_format.clone()))
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }

    match trimmed.parse::<NoteId>() {
        Ok(note_id) if note_id.get() > 0 => Ok(note_id),
        _ => Err(CliError::InvalidNoteId(trimmed.to_string())),
    }
}

pub async fn resolve_note(repo: &LocalNoteRepository, id: NoteId) -> Result<Note, CliError> {
    repo.get_note_by_id(id)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))
}

/// Press the photo button the way a user would to end up with `photo`
pub fn apply_photo(screen: &mut Screen, photo: Option<&str>, remove: bool) {
    if (remove || photo.is_some())
        && screen.on_photo_button() == Some(PhotoPrompt::ConfirmRemoval)
    {
        screen.confirm_photo_removal();
    }

    if let Some(url) = photo {
        if screen.on_photo_button() == Some(PhotoPrompt::EnterUrl) {
            screen.submit_photo_url(url);
        }
    }
}

/// Press save and wait until the screen would close
pub async fn save_and_wait(screen: &mut Screen, title: &str, content: &str) -> Result<(), CliError> {
    if let SaveOutcome::Invalid(error) = screen.on_save(title, content)? {
        return Err(error.into());
    }

    match screen.next_event().await {
        Some(ScreenEvent::NavigateUp) => Ok(()),
        Some(ScreenEvent::ShowMessage(message)) => Err(CliError::SaveFailed(message)),
        None => Err(CliError::SaveFailed("Save did not complete".to_string())),
    }
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let title = note_preview(&note.title, 30);
            let relative_time = format_relative_time(note.last_touched().as_millis(), now_ms);
            let photo = if note.has_photo() { "  [photo]" } else { "" };
            format!("{:>6}  {title:<30}  {relative_time}{photo}", note.id)
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        preview: note_preview(note.content.as_deref().unwrap_or(""), 60),
        photo_url: note.photo_url.clone(),
        create_date: note.create_date.as_millis(),
        modify_date: note.modify_date.map(notepad_core::Timestamp::as_millis),
        relative_time: format_relative_time(note.last_touched().as_millis(), now_ms),
    }
}

pub fn note_preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
