//! Configuration management for campfinder
//!
//! Handles loading and saving configuration from TOML files. The pipeline is
//! normally run from a project directory holding the database, so both the
//! config file and the database default to the working directory.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location (working directory)
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(default_config_file())
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the given path, or fall back to defaults when no file exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)
        } else if path.is_some() {
            // Explicitly requested file must exist
            Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            debug!("No config file at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Write this configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, default_db_path());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.database.path = PathBuf::from("custom.db");
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.database.path, PathBuf::from("custom.db"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let err = Config::load_or_default(Some(Path::new("/nonexistent/config.toml")));
        assert!(err.is_err());
    }
}
