use notepad_core::NoteDetailsArgs;

use crate::commands::common::{apply_photo, open_repository, open_screen, save_and_wait, AppContext};
use crate::error::CliError;

pub async fn run_add(
    title: &str,
    content: &str,
    photo: Option<&str>,
    ctx: &AppContext,
) -> Result<(), CliError> {
    let repo = open_repository(&ctx.db_path)?;
    let mut screen = open_screen(&repo, NoteDetailsArgs::add(), ctx)?;
    screen.start();

    apply_photo(&mut screen, photo, false);
    save_and_wait(&mut screen, title, content).await?;

    println!("Saved \"{}\"", title.trim());
    Ok(())
}
