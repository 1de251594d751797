//! Persistent CLI configuration.

use std::env;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use notepad_core::db::NOTE_DATABASE_NAME;
use notepad_core::screen::DEFAULT_DATE_TIME_FORMAT;
use notepad_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
pub const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub date_time_format: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notepad")
        .join(CONFIG_FILE_NAME)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notepad")
        .join(NOTE_DATABASE_NAME)
}

/// Reject strftime patterns chrono cannot render
pub fn validate_date_time_format(pattern: &str) -> Result<(), String> {
    if pattern.trim().is_empty() {
        return Err("date_time_format must not be empty".to_string());
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date_time_format: {pattern}"));
    }
    Ok(())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Pattern for note timestamps, falling back to the built-in one
    pub fn date_time_format(&self) -> String {
        self.date_time_format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_TIME_FORMAT.to_string())
    }

    /// `--db-path`, then `NOTEPAD_DB_PATH`, then the config file, then the data directory
    pub fn resolve_db_path(&self, cli_db_path: Option<PathBuf>) -> PathBuf {
        self.resolve_db_path_from(cli_db_path, env::var_os(DB_PATH_ENV).map(PathBuf::from))
    }

    pub fn resolve_db_path_from(
        &self,
        cli_db_path: Option<PathBuf>,
        env_db_path: Option<PathBuf>,
    ) -> PathBuf {
        cli_db_path
            .or(env_db_path)
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(default_db_path)
    }

    fn normalize(&mut self) {
        self.date_time_format = normalize_text_option(self.date_time_format.take())
            .filter(|pattern| validate_date_time_format(pattern).is_ok());
        self.database_path = self
            .database_path
            .take()
            .filter(|path| !path.as_os_str().is_empty());
    }
}
