//! Notepad CLI - add, view, and edit notes from the terminal
//!
//! Each note command drives the same screen controller a graphical front end
//! would use.

mod cli;
mod commands;
mod config;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::add::run_add;
use crate::commands::common::AppContext;
use crate::commands::config::{run_config_set, run_config_show};
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditRequest};
use crate::commands::list::run_list;
use crate::commands::view::run_view;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "notepad=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;
    let ctx = AppContext {
        db_path: config.resolve_db_path(cli.db_path.clone()),
        date_time_format: config.date_time_format(),
    };

    match cli.command {
        Some(Commands::Add {
            title,
            content,
            photo,
        }) => run_add(&title, &content, photo.as_deref(), &ctx).await?,
        Some(Commands::List { json }) => run_list(json, &ctx).await?,
        Some(Commands::View { id }) => run_view(&id, &ctx).await?,
        Some(Commands::Edit {
            id,
            title,
            content,
            photo,
            remove_photo,
        }) => {
            let request = EditRequest {
                title,
                content,
                photo,
                remove_photo,
            };
            run_edit(&id, request, &ctx).await?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, &ctx).await?,
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => run_config_show(&config, cli.db_path)?,
            ConfigCommands::Set {
                database_path,
                date_time_format,
            } => run_config_set(config, database_path, date_time_format)?,
        },
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
