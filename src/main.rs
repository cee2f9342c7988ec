//! campfinder CLI entry point

use campfinder::{
    commands::{
        cmd_classify, cmd_init, cmd_normalize, cmd_rollup, cmd_run, cmd_status,
        print_classify_stats, print_normalize_stats, print_rollup_stats, print_run_stats,
        print_status, InitOptions,
    },
    config::Config,
    error::{Error, Result},
    store::Db,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "campfinder")]
#[command(version, about = "RV campground data normalization and classification pipeline", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the SQLite database (overrides the config)
    #[arg(long, global = true, env = "CAMPFINDER_DB")]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config and create the database schema
    Init {
        /// Force overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Stage 1: pivot raw attributes into typed per-site rows
    Normalize,

    /// Stage 2: aggregate per-site rows to one row per facility
    Rollup,

    /// Stage 3: derive condition categories and display tags
    Classify,

    /// Run all three stages in order
    Run,

    /// Show table counts and last-run timestamps
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Completions need neither config nor database
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "campfinder", &mut std::io::stdout());
        return Ok(());
    }

    // Init creates the config rather than loading it
    if let Commands::Init { force } = cli.command {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(Config::default_config_path);
        let config = cmd_init(InitOptions {
            config_path: config_path.clone(),
            db_path: cli.db.clone(),
            force,
        })
        .await?;

        println!("✓ campfinder initialized");
        println!("  Config:   {}", config_path.display());
        println!("  Database: {}", config.database.path.display());
        println!("\nNext steps:");
        println!("  1. Load raw inventory data into the database");
        println!("  2. Run the pipeline: campfinder run");
        return Ok(());
    }

    // Load configuration and open the database
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(db_path) = &cli.db {
        config.database.path = db_path.clone();
    }

    let db = Db::connect(&config.database.path).await?;
    if !db.is_initialized().await? {
        return Err(Error::NotInitialized);
    }

    // A stage run with advisory validation errors commits its output but
    // exits nonzero so an operator notices
    let mut validation_errors = 0i64;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Normalize => {
            let stats = cmd_normalize(&db).await?;
            validation_errors = stats.validation_errors;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_normalize_stats(&stats);
            }
        }

        Commands::Rollup => {
            let stats = cmd_rollup(&db).await?;
            validation_errors = stats.validation_errors;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_rollup_stats(&stats);
            }
        }

        Commands::Classify => {
            let stats = cmd_classify(&db).await?;
            validation_errors = stats.validation_errors;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_classify_stats(&stats);
            }
        }

        Commands::Run => {
            let stats = cmd_run(&db).await?;
            validation_errors = stats.validation_errors();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_run_stats(&stats);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &db).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    if validation_errors > 0 {
        error!(
            validation_errors,
            "pipeline output committed with validation errors"
        );
        std::process::exit(1);
    }

    Ok(())
}
