use notepad_core::repository::NoteRepository;

use crate::commands::common::{open_repository, parse_note_id, resolve_note, AppContext};
use crate::error::CliError;

pub async fn run_delete(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let repo = open_repository(&ctx.db_path)?;
    let note = resolve_note(&repo, note_id).await?;

    repo.delete_note(note.id).await?;
    println!("{}", note.id);
    Ok(())
}
