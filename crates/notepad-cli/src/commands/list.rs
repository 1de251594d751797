use notepad_core::repository::NoteRepository;

use crate::commands::common::{
    format_note_lines, note_to_list_item, open_repository, AppContext, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(as_json: bool, ctx: &AppContext) -> Result<(), CliError> {
    let repo = open_repository(&ctx.db_path)?;
    let notes = repo.get_all_notes().await?;

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes yet");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
