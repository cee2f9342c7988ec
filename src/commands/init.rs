//! Init command - write the default config and create the database schema

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{Db, SCHEMA_VERSION};
use std::path::PathBuf;
use tracing::info;

/// Init options
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Where to write the config file
    pub config_path: PathBuf,
    /// Database path override (defaults to the config default)
    pub db_path: Option<PathBuf>,
    /// Overwrite an existing config file
    pub force: bool,
}

/// Create the config file and the full database schema
pub async fn cmd_init(options: InitOptions) -> Result<Config> {
    if options.config_path.exists() && !options.force {
        return Err(Error::AlreadyInitialized(
            options.config_path.display().to_string(),
        ));
    }

    let mut config = Config::default();
    if let Some(db_path) = options.db_path {
        config.database.path = db_path;
    }
    config.save(&options.config_path)?;
    info!(path = %options.config_path.display(), "wrote config");

    let db = Db::connect(&config.database.path).await?;
    db.init_schema().await?;
    db.set_meta(&[("schema_version", SCHEMA_VERSION.to_string())])
        .await?;
    info!(path = %config.database.path.display(), "database schema created");

    Ok(config)
}
