//! Status command - row counts and last-run timestamps

use crate::config::Config;
use crate::error::Result;
use crate::store::Db;
use serde::{Deserialize, Serialize};

/// Row count for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

/// Pipeline status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub db_path: String,
    pub schema_version: Option<String>,
    pub raw_tables: Vec<TableCount>,
    pub output_tables: Vec<TableCount>,
    pub normalize_last_run: Option<String>,
    pub rollup_last_run: Option<String>,
    pub classify_last_run: Option<String>,
}

const RAW_TABLES: [&str; 6] = [
    "facilities",
    "organizations",
    "campsites",
    "campsite_attributes",
    "campsite_equipment",
    "facility_activities",
];

const OUTPUT_TABLES: [&str; 6] = [
    "norm_campsite",
    "norm_campsite_equipment",
    "norm_facility",
    "facility_rollup",
    "facility_conditions",
    "facility_tags",
];

/// Gather pipeline status
pub async fn cmd_status(config: &Config, db: &Db) -> Result<StatusInfo> {
    let mut raw_tables = Vec::with_capacity(RAW_TABLES.len());
    for table in RAW_TABLES {
        raw_tables.push(TableCount {
            table: table.to_string(),
            rows: db.table_count(table).await?,
        });
    }
    let mut output_tables = Vec::with_capacity(OUTPUT_TABLES.len());
    for table in OUTPUT_TABLES {
        output_tables.push(TableCount {
            table: table.to_string(),
            rows: db.table_count(table).await?,
        });
    }

    Ok(StatusInfo {
        db_path: config.database.path.display().to_string(),
        schema_version: db.get_meta("schema_version").await?,
        raw_tables,
        output_tables,
        normalize_last_run: db.get_meta("normalize_last_run").await?,
        rollup_last_run: db.get_meta("rollup_last_run").await?,
        classify_last_run: db.get_meta("classify_last_run").await?,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\ncampfinder status\n");
    println!("Database: {}", status.db_path);
    println!(
        "Schema version: {}",
        status.schema_version.as_deref().unwrap_or("not initialized")
    );

    println!("\nRaw input tables:");
    for t in &status.raw_tables {
        println!("  {:28} {:>10}", t.table, t.rows);
    }

    println!("\nPipeline output tables:");
    for t in &status.output_tables {
        println!("  {:28} {:>10}", t.table, t.rows);
    }

    println!("\nLast runs:");
    println!(
        "  normalize: {}",
        status.normalize_last_run.as_deref().unwrap_or("never")
    );
    println!(
        "  rollup:    {}",
        status.rollup_last_run.as_deref().unwrap_or("never")
    );
    println!(
        "  classify:  {}",
        status.classify_last_run.as_deref().unwrap_or("never")
    );
}
