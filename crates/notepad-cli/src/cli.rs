use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "notepad")]
#[command(about = "Add, view, and edit notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,
        /// Note content
        #[arg(short, long)]
        content: String,
        /// Photo URL to attach
        #[arg(short, long, value_name = "URL")]
        photo: Option<String>,
    },
    /// List notes, most recently touched first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a note with its timestamps
    View {
        /// Note ID
        id: String,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// Replace the photo URL
        #[arg(short, long, value_name = "URL", conflicts_with = "remove_photo")]
        photo: Option<String>,
        /// Remove the attached photo
        #[arg(long)]
        remove_photo: bool,
    },
    /// Delete an existing note
    Delete {
        /// Note ID
        id: String,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Update configuration values
    Set {
        /// Database file used when --db-path is not given
        #[arg(long, value_name = "PATH")]
        database_path: Option<PathBuf>,
        /// strftime pattern for note timestamps
        #[arg(long, value_name = "FORMAT")]
        date_time_format: Option<String>,
    },
}
