use notepad_core::NoteDetailsArgs;

use crate::commands::common::{open_repository, open_screen, parse_note_id, resolve_note, AppContext};
use crate::error::CliError;

pub async fn run_view(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let repo = open_repository(&ctx.db_path)?;
    let note = resolve_note(&repo, note_id).await?;

    let mut screen = open_screen(&repo, NoteDetailsArgs::view(note), ctx)?;
    let view = screen.start();

    println!("{}", view.title.unwrap_or_default());
    if let Some(content) = view.content {
        println!();
        println!("{content}");
    }
    if let Some(photo_url) = view.photo_url {
        println!();
        println!("Photo: {photo_url}");
    }
    if let Some(info) = screen.note_info() {
        println!();
        println!("Created:  {}", info.created);
        if let Some(modified) = info.modified {
            println!("Modified: {modified}");
        }
    }

    Ok(())
}
