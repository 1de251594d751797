//! Headless controller for the note details screen
//!
//! Turns user actions into state machine calls and state into a
//! [`Presentation`] that a front end renders.

use chrono::Local;
use thiserror::Error;

use super::state::{Mode, NoteEvent, UiState};
use super::view_model::NoteViewModel;
use crate::error::Result;
use crate::models::NoteDetailsArgs;
use crate::repository::NoteRepository;
use crate::util::normalize_text_option;

/// Date-time pattern used by the note info dialog
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Input rejected before it reaches the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a title for your note")]
    MissingTitle,
    #[error("Please enter content for your note")]
    MissingContent,
}

/// Result of pressing save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Save scheduled, wait for [`NoteScreenController::next_event`]
    Started,
    /// Nothing saved; show the message
    Invalid(ValidationError),
}

/// Dialog the photo button asks the front end to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoPrompt {
    /// Ask for a photo URL
    EnterUrl,
    /// Confirm removing the current photo
    ConfirmRemoval,
}

/// Icon on the photo button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoButton {
    Hidden,
    AddPhoto,
    RemovePhoto,
    Edit,
}

/// Something the front end should do in response to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Leave the screen
    NavigateUp,
    /// Show a transient message and stay
    ShowMessage(String),
}

/// Formatted timestamps for the note info dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInfo {
    pub created: String,
    /// Absent until the note has been edited
    pub modified: Option<String>,
}

/// What the screen should currently look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub mode: Mode,
    /// Prefilled title, from the note being viewed or edited
    pub title: Option<String>,
    /// Prefilled content, from the note being viewed or edited
    pub content: Option<String>,
    pub fields_editable: bool,
    /// Put the cursor in the title field on open
    pub focus_title: bool,
    pub save_visible: bool,
    pub info_visible: bool,
    /// Photo to load, `None` hides the image
    pub photo_url: Option<String>,
    pub photo_button: PhotoButton,
}

impl Presentation {
    fn from_state(state: &UiState) -> Self {
        let photo_button = match state.mode {
            Mode::Initial => PhotoButton::Hidden,
            Mode::Viewing => PhotoButton::Edit,
            Mode::Adding | Mode::Editing if state.photo_url.is_some() => PhotoButton::RemovePhoto,
            Mode::Adding | Mode::Editing => PhotoButton::AddPhoto,
        };

        Self {
            mode: state.mode,
            title: state.note.as_ref().map(|note| note.title.clone()),
            content: state.note.as_ref().and_then(|note| note.content.clone()),
            fields_editable: state.mode.can_save(),
            focus_title: state.mode == Mode::Adding,
            save_visible: state.mode.can_save(),
            info_visible: state.mode == Mode::Viewing,
            photo_url: state.photo_url.clone(),
            photo_button,
        }
    }
}

/// Check the title and content typed into the screen
pub fn validate_note_input(title: &str, content: &str) -> std::result::Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if content.trim().is_empty() {
        return Err(ValidationError::MissingContent);
    }
    Ok(())
}

/// Controller for one note details screen
pub struct NoteScreenController<R> {
    view_model: NoteViewModel<R>,
    args: NoteDetailsArgs,
    date_time_format: String,
}

impl<R> NoteScreenController<R>
where
    R: NoteRepository + 'static,
{
    pub fn new(view_model: NoteViewModel<R>, args: NoteDetailsArgs) -> Self {
        Self {
            view_model,
            args,
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }

    /// Override the info dialog's date-time pattern
    #[must_use]
    pub fn with_date_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_time_format = pattern.into();
        self
    }

    /// Apply the entry arguments if the screen has not been set up yet
    pub fn start(&mut self) -> Presentation {
        if self.view_model.mode() == Mode::Initial {
            self.view_model.initialize(&self.args);
        }
        self.presentation()
    }

    pub fn state(&self) -> UiState {
        self.view_model.state()
    }

    pub const fn view_model(&self) -> &NoteViewModel<R> {
        &self.view_model
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::from_state(&self.view_model.state())
    }

    /// Photo button: edits a viewed note, otherwise asks to add or remove a photo
    pub fn on_photo_button(&mut self) -> Option<PhotoPrompt> {
        let state = self.view_model.state();
        match state.mode {
            Mode::Viewing => {
                self.view_model.begin_edit();
                None
            }
            Mode::Adding | Mode::Editing if state.photo_url.is_some() => {
                Some(PhotoPrompt::ConfirmRemoval)
            }
            Mode::Adding | Mode::Editing => Some(PhotoPrompt::EnterUrl),
            Mode::Initial => None,
        }
    }

    /// URL typed into the photo dialog
    pub fn submit_photo_url(&mut self, url: &str) {
        let url = normalize_text_option(Some(url.to_string()));
        if url.as_deref().is_some_and(|value| !crate::util::is_http_url(value)) {
            tracing::debug!("Photo URL without http(s) scheme: {url:?}");
        }
        self.view_model.set_photo(url);
    }

    /// Photo removal confirmed
    pub fn confirm_photo_removal(&mut self) {
        self.view_model.set_photo(None);
    }

    /// Save button
    pub fn on_save(&mut self, title: &str, content: &str) -> Result<SaveOutcome> {
        if let Err(error) = validate_note_input(title, content) {
            return Ok(SaveOutcome::Invalid(error));
        }
        self.view_model.save(title, Some(content.to_string()))?;
        Ok(SaveOutcome::Started)
    }

    /// Back button
    pub const fn on_back(&self) -> ScreenEvent {
        ScreenEvent::NavigateUp
    }

    /// Wait for the pending save and translate its outcome
    pub async fn next_event(&mut self) -> Option<ScreenEvent> {
        let event = self.view_model.next_event().await?;
        Some(match event {
            NoteEvent::NoteSaved => ScreenEvent::NavigateUp,
            NoteEvent::SaveFailed { message } => {
                ScreenEvent::ShowMessage(format!("Could not save note: {message}"))
            }
        })
    }

    /// Timestamps of the note on screen, `None` while adding
    pub fn note_info(&self) -> Option<NoteInfo> {
        let state = self.view_model.state();
        let note = state.note.as_ref()?;
        Some(NoteInfo {
            created: note.create_date.format_in(&Local, &self.date_time_format),
            modified: note
                .modify_date
                .map(|ts| ts.format_in(&Local, &self.date_time_format)),
        })
    }
}
