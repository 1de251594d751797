use notepad_core::NoteDetailsArgs;

use crate::commands::common::{
    apply_photo, open_repository, open_screen, parse_note_id, resolve_note, save_and_wait,
    AppContext,
};
use crate::error::CliError;

pub struct EditRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub photo: Option<String>,
    pub remove_photo: bool,
}

impl EditRequest {
    const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.photo.is_none() && !self.remove_photo
    }
}

pub async fn run_edit(id: &str, request: EditRequest, ctx: &AppContext) -> Result<(), CliError> {
    if request.is_empty() {
        return Err(CliError::NothingToEdit);
    }

    let note_id = parse_note_id(id)?;
    let repo = open_repository(&ctx.db_path)?;
    let note = resolve_note(&repo, note_id).await?;

    let stored_content = note
        .content
        .as_deref()
        .is_some_and(|content| !content.trim().is_empty());
    if request.content.is_none() && !stored_content {
        return Err(CliError::ContentRequired(note.id.to_string()));
    }

    let mut screen = open_screen(&repo, NoteDetailsArgs::view(note.clone()), ctx)?;
    screen.start();
    // From the read-only view the photo button switches to editing
    screen.on_photo_button();

    apply_photo(&mut screen, request.photo.as_deref(), request.remove_photo);

    let title = request.title.unwrap_or(note.title);
    let content = request.content.or(note.content).unwrap_or_default();
    save_and_wait(&mut screen, &title, &content).await?;

    println!("{}", note.id);
    Ok(())
}
