//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/bookshelf/config.toml)
//! 3. Environment variables (BOOKSHELF_* prefix)
//!
//! Environment variables take precedence over config file values.
//! Command-line flags are applied on top by the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "BOOKSHELF";

/// Default backing file name, relative to the working directory
const DEFAULT_DATA_FILE: &str = "data.json";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON file holding the collection
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Copy unparseable backing files aside before they can be overwritten
    #[serde(default = "default_backup_corrupt")]
    pub backup_corrupt: bool,

    /// Log level for the CLI's tracing subscriber
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_corrupt: default_backup_corrupt(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (BOOKSHELF_DATA_FILE, BOOKSHELF_BACKUP_CORRUPT, BOOKSHELF_LOG_LEVEL)
    /// 2. Config file (~/.config/bookshelf/config.toml or BOOKSHELF_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit config file path
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::load_file_only(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load only what the config file says, ignoring environment variables
    ///
    /// Used when the result is written back to disk, so one-off overrides
    /// never end up persisted. If the file doesn't exist, defaults are used.
    pub fn load_file_only(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::load_from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from a TOML string
    ///
    /// Missing keys take their defaults. No environment overrides are applied.
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        toml::from_str(toml_content).context("Failed to parse config TOML")
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // BOOKSHELF_DATA_FILE
        if let Ok(val) = std::env::var(format!("{}_DATA_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.data_file = PathBuf::from(val);
            }
        }

        // BOOKSHELF_BACKUP_CORRUPT
        if let Ok(val) = std::env::var(format!("{}_BACKUP_CORRUPT", ENV_PREFIX)) {
            self.backup_corrupt = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // BOOKSHELF_LOG_LEVEL
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.log_level = val;
            }
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with BOOKSHELF_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookshelf")
            .join("config.toml")
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_backup_corrupt() -> bool {
    true
}

fn default_log_level() -> String {
    "error".to_string()
}
