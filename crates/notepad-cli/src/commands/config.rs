use std::path::PathBuf;

use serde::Serialize;

use crate::config::{default_config_path, validate_date_time_format, CliConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    config_path: PathBuf,
    database_path: PathBuf,
    date_time_format: String,
}

pub fn run_config_show(config: &CliConfig, cli_db_path: Option<PathBuf>) -> Result<(), CliError> {
    let effective = EffectiveConfig {
        config_path: default_config_path(),
        database_path: config.resolve_db_path(cli_db_path),
        date_time_format: config.date_time_format(),
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

pub fn run_config_set(
    mut config: CliConfig,
    database_path: Option<PathBuf>,
    date_time_format: Option<String>,
) -> Result<(), CliError> {
    apply_config_changes(&mut config, database_path, date_time_format)?;
    let path = config.save().map_err(CliError::Config)?;
    println!("{}", path.display());
    Ok(())
}

pub fn apply_config_changes(
    config: &mut CliConfig,
    database_path: Option<PathBuf>,
    date_time_format: Option<String>,
) -> Result<(), CliError> {
    if let Some(pattern) = date_time_format {
        validate_date_time_format(&pattern).map_err(CliError::Config)?;
        config.date_time_format = Some(pattern);
    }
    if let Some(path) = database_path {
        config.database_path = Some(path);
    }
    Ok(())
}
