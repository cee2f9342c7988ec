//! Default values for configuration

use std::path::PathBuf;

/// Default database file in the working directory
pub fn default_db_path() -> PathBuf {
    PathBuf::from("campfinder.db")
}

/// Default config file name in the working directory
pub fn default_config_file() -> &'static str {
    "campfinder.toml"
}
