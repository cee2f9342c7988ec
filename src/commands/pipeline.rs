//! Pipeline stage commands

use crate::classify::{self, ClassifyStats};
use crate::error::Result;
use crate::normalize::{self, NormalizeStats};
use crate::rollup::{self, RollupStats};
use crate::store::Db;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Combined stats for a full pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub normalize: NormalizeStats,
    pub rollup: RollupStats,
    pub classify: ClassifyStats,
}

impl RunStats {
    /// Total advisory validation errors across all stages
    pub fn validation_errors(&self) -> i64 {
        self.normalize.validation_errors
            + self.rollup.validation_errors
            + self.classify.validation_errors
    }
}

/// Stage 1: normalize raw attributes, equipment and descriptions
pub async fn cmd_normalize(db: &Db) -> Result<NormalizeStats> {
    info!("Starting normalize stage");
    normalize::run(db).await
}

/// Stage 2: aggregate to one row per facility
pub async fn cmd_rollup(db: &Db) -> Result<RollupStats> {
    info!("Starting rollup stage");
    rollup::run(db).await
}

/// Stage 3: derive conditions and tags
pub async fn cmd_classify(db: &Db) -> Result<ClassifyStats> {
    info!("Starting classify stage");
    classify::run(db).await
}

/// All three stages, strictly in order
pub async fn cmd_run(db: &Db) -> Result<RunStats> {
    let normalize = cmd_normalize(db).await?;
    let rollup = cmd_rollup(db).await?;
    let classify = cmd_classify(db).await?;
    Ok(RunStats {
        normalize,
        rollup,
        classify,
    })
}

/// Print normalize stats to console
pub fn print_normalize_stats(stats: &NormalizeStats) {
    println!("\n✓ Normalize complete");
    println!("  Campsites normalized: {}", stats.campsites);
    println!("  Equipment rows:       {}", stats.equipment_rows);
    println!("  Facilities mined:     {}", stats.facilities);
    if stats.validation_errors > 0 {
        println!("  Validation errors:    {}", stats.validation_errors);
    }
}

/// Print rollup stats to console
pub fn print_rollup_stats(stats: &RollupStats) {
    println!("\n✓ Rollup complete");
    println!("  Facility rows: {}", stats.facilities);
    println!("  Orphans:       {}", stats.orphans);
    if stats.validation_errors > 0 {
        println!("  Validation errors: {}", stats.validation_errors);
    }
}

/// Print classify stats to console
pub fn print_classify_stats(stats: &ClassifyStats) {
    println!("\n✓ Classify complete");
    println!("  Condition rows: {}", stats.conditions);
    println!("  Tag rows:       {}", stats.tags);
    if stats.validation_errors > 0 {
        println!("  Validation errors: {}", stats.validation_errors);
    }
}

/// Print full run stats to console
pub fn print_run_stats(stats: &RunStats) {
    print_normalize_stats(&stats.normalize);
    print_rollup_stats(&stats.rollup);
    print_classify_stats(&stats.classify);
}
