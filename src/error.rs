//! Custom error types for campfinder

use thiserror::Error;

/// Main error type for campfinder operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not initialized: run 'campfinder init' first")]
    NotInitialized,

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("Stage not ready: {0} is empty — run the previous stage first")]
    StageNotReady(&'static str),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

/// Result type alias for campfinder
pub type Result<T> = std::result::Result<T, Error>;
