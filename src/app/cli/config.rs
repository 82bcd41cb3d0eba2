//! TOML configuration file parsing and loading
//!
//! Handles default config file discovery, validation of config values, and
//! the optional `[games]` catalog table. CLI flags always win over config
//! values; merging happens in startup.

use crate::core::error_handling::ContextualError;
use crate::inventory::GameInfo;
use std::collections::HashMap;
use std::path::PathBuf;

use super::args::parse_scanner_delay;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {path}")]
    NotFound { path: String },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("{message}")]
    InvalidValue { message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::InvalidValue { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { message } => Some(message),
            _ => None,
        }
    }
}

/// Values loadable from the config file
#[derive(Debug, Default, Clone)]
pub struct FileConfig {
    pub scanner_delay_ms: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub log_format: Option<String>,
    pub color: Option<bool>,
    /// Game catalog overrides, keyed by 5-digit gamepack prefix
    pub games: HashMap<String, GameInfo>,
}

/// Locate and load the config file.
///
/// A user-specified path must exist; otherwise the default location
/// (`<config dir>/packtrack/packtrack.toml`) is used when present. No file
/// at all yields the empty config.
pub async fn load(config_file: Option<PathBuf>) -> Result<FileConfig, ConfigError> {
    let config_path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                });
            }
            Some(path)
        }
        None => {
            let default_path =
                dirs::config_dir().map(|d| d.join("packtrack").join("packtrack.toml"));
            match default_path {
                Some(path) if path.exists() => Some(path),
                _ => None,
            }
        }
    };

    let Some(path) = config_path else {
        return Ok(FileConfig::default());
    };

    let contents =
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;

    parse(&contents, &path.display().to_string())
}

/// Parse config file contents, validating every recognised key
pub fn parse(contents: &str, path: &str) -> Result<FileConfig, ConfigError> {
    let table = toml::from_str::<toml::Table>(contents).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let mut config = FileConfig::default();

    if let Some(value) = table.get("scanner_delay_ms") {
        let raw = value
            .as_integer()
            .ok_or_else(|| invalid("scanner_delay_ms must be an integer"))?;
        let ms = parse_scanner_delay(&raw.to_string())
            .map_err(|message| ConfigError::InvalidValue { message })?;
        config.scanner_delay_ms = Some(ms);
    }

    config.log_level = string_field(&table, "log_level")?;
    config.log_file = string_field(&table, "log_file")?;
    config.log_format = string_field(&table, "log_format")?;

    if let Some(value) = table.get("color") {
        config.color = Some(
            value
                .as_bool()
                .ok_or_else(|| invalid("color must be a boolean"))?,
        );
    }

    if let Some(games) = table.get("games") {
        let games = games
            .as_table()
            .ok_or_else(|| invalid("[games] must be a table of game entries"))?;
        for (prefix, entry) in games {
            if prefix.len() != 5 || !prefix.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid(&format!(
                    "game key '{}' must be a 5-digit gamepack prefix",
                    prefix
                )));
            }
            let entry = entry
                .as_table()
                .ok_or_else(|| invalid(&format!("game entry '{}' must be a table", prefix)))?;
            config.games.insert(
                prefix.clone(),
                GameInfo {
                    name: game_field(entry, prefix, "name")?,
                    price: game_field(entry, prefix, "price")?,
                    kind: game_field(entry, prefix, "type")?,
                },
            );
        }
    }

    Ok(config)
}

fn game_field(entry: &toml::Table, prefix: &str, key: &str) -> Result<String, ConfigError> {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            invalid(&format!(
                "game entry '{}' is missing a string '{}' field",
                prefix, key
            ))
        })
}

fn string_field(table: &toml::Table, key: &str) -> Result<Option<String>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid(&format!("{} must be a string", key))),
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        message: message.to_string(),
    }
}
