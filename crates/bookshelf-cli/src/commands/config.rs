//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use bookshelf_core::Config;

use crate::output::{Output, OutputFormat};

/// Valid keys for `config set`
const KEYS: &str = "data_file, backup_corrupt, log_level";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_file": config.data_file,
                    "backup_corrupt": config.backup_corrupt,
                    "log_level": config.log_level
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_file.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_file:      {}", config.data_file.display());
            println!("  backup_corrupt: {}", config.backup_corrupt);
            println!("  log_level:      {}", config.log_level);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    // File values only: BOOKSHELF_* overrides stay out of the saved file
    let mut config =
        Config::load_file_only(&save_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a single key/value pair to the configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_file" => {
            if value.is_empty() {
                bail!("data_file cannot be empty");
            }
            config.data_file = value.into();
        }
        "backup_corrupt" => {
            config.backup_corrupt = value
                .parse()
                .context("Invalid value for backup_corrupt. Use 'true' or 'false'.")?;
        }
        "log_level" => {
            config.log_level = value.to_string();
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: {}",
                key,
                KEYS
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Holds the env lock and restores one variable on drop
    struct EnvVarGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        name: &'static str,
        saved: Option<String>,
    }

    impl<'a> EnvVarGuard<'a> {
        fn set(name: &'static str, value: &str) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = env::var(name).ok();
            env::set_var(name, value);
            Self {
                _lock: lock,
                name,
                saved,
            }
        }
    }

    impl Drop for EnvVarGuard<'_> {
        fn drop(&mut self) {
            match &self.saved {
                Some(v) => env::set_var(self.name, v),
                None => env::remove_var(self.name),
            }
        }
    }

    #[test]
    fn test_set_writes_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "log_level".to_string(),
            "info".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("log_level = \"info\""));
        show(Some(&path), &output).unwrap();
    }

    #[test]
    fn test_set_keeps_env_overrides_out_of_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "data_file = \"mine.json\"\n").unwrap();
        let output = Output::new(OutputFormat::Quiet);

        let _guard = EnvVarGuard::set("BOOKSHELF_DATA_FILE", "/tmp/one-off.json");
        set(
            "log_level".to_string(),
            "info".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let saved = Config::load_file_only(&path).unwrap();
        assert_eq!(saved.data_file, PathBuf::from("mine.json"));
        assert_eq!(saved.log_level, "info");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("one-off"));
    }

    #[test]
    fn test_set_unknown_key_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        assert!(set("colour".to_string(), "blue".to_string(), Some(&path), &output).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "data_file", "/books/shelf.json").unwrap();
        apply(&mut config, "backup_corrupt", "false").unwrap();
        apply(&mut config, "log_level", "debug").unwrap();

        assert_eq!(config.data_file, PathBuf::from("/books/shelf.json"));
        assert!(!config.backup_corrupt);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply(&mut config, "colour", "blue").is_err());
        assert!(apply(&mut config, "backup_corrupt", "maybe").is_err());
        assert!(apply(&mut config, "data_file", "").is_err());
        assert_eq!(config, Config::default());
    }
}
