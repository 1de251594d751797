//! Note details screen: state machine and controller

mod controller;
mod state;
mod view_model;

pub use controller::{
    validate_note_input, NoteInfo, NoteScreenController, PhotoButton, PhotoPrompt, Presentation,
    SaveOutcome, ScreenEvent, ValidationError, DEFAULT_DATE_TIME_FORMAT,
};
pub use state::{Mode, NoteEvent, UiState};
pub use view_model::NoteViewModel;
