//! Stage 3: Condition Classifier & Tagger
//!
//! Reads `facility_rollup` and derives one `facility_conditions` row plus
//! zero or more `facility_tags` rows per facility. Both tables are rewritten
//! together in one transaction.

pub mod conditions;
pub mod tags;

use crate::error::{Error, Result};
use crate::models::{FacilityConditions, FacilityRollup};
use crate::store::Db;
use self::conditions::{
    classify_boondock, classify_driveway_surface, classify_fire_status, classify_road_access,
    classify_seasonal_status,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Stage 3 result counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyStats {
    pub conditions: usize,
    pub tags: usize,
    pub validation_errors: i64,
}

/// Derive the condition row for one facility
pub fn build_conditions(r: &FacilityRollup) -> FacilityConditions {
    FacilityConditions {
        facility_id: r.facility_id.clone(),
        road_access: classify_road_access(r).as_str().to_string(),
        driveway_surface: classify_driveway_surface(r),
        seasonal_status: classify_seasonal_status(r).as_str().to_string(),
        fire_status: classify_fire_status(r).as_str().to_string(),
        elevation_ft: r.desc_elevation_ft,
        boondock_accessibility: classify_boondock(r).map(|b| b.as_str().to_string()),
        max_rv_length: r.max_rv_length,
    }
}

/// Run the classification stage end to end
pub async fn run(db: &Db) -> Result<ClassifyStats> {
    // Pre-flight: stage 2 output must exist
    if db.table_count("facility_rollup").await? == 0 {
        return Err(Error::StageNotReady("facility_rollup"));
    }

    let rollups = db.load_rollups().await?;
    info!(facilities = rollups.len(), "classifying conditions and tags");

    let mut condition_rows = Vec::with_capacity(rollups.len());
    let mut tag_rows = Vec::new();
    for r in &rollups {
        condition_rows.push(build_conditions(r));
        tag_rows.extend(tags::compute_tags(r));
    }

    db.replace_conditions_and_tags(&condition_rows, &tag_rows)
        .await?;
    info!(
        conditions = condition_rows.len(),
        tags = tag_rows.len(),
        "facility_conditions and facility_tags rebuilt"
    );

    db.set_meta(&[
        ("classify_last_run", chrono::Utc::now().to_rfc3339()),
        (
            "facility_conditions_count",
            condition_rows.len().to_string(),
        ),
        ("facility_tags_count", tag_rows.len().to_string()),
    ])
    .await?;

    let validation_errors = validate(db).await?;

    Ok(ClassifyStats {
        conditions: condition_rows.len(),
        tags: tag_rows.len(),
        validation_errors,
    })
}

/// Advisory post-build checks
async fn validate(db: &Db) -> Result<i64> {
    let mut errors = 0;

    let rollups = db.table_count("facility_rollup").await?;
    let conditions = db.table_count("facility_conditions").await?;
    if rollups != conditions {
        warn!(
            rollups,
            conditions, "condition row count does not match rollup"
        );
        errors += 1;
    }

    // FULL_HOOKUPS tag must exist exactly when the rollup flag is set
    let tag_without_flag = db
        .scalar(
            "SELECT COUNT(*) FROM facility_tags t \
             JOIN facility_rollup fr ON t.facility_id = fr.facility_id \
             WHERE t.tag = 'FULL_HOOKUPS' AND fr.has_full_hookup = 0",
        )
        .await?;
    if tag_without_flag > 0 {
        warn!(rows = tag_without_flag, "FULL_HOOKUPS tag without rollup flag");
        errors += 1;
    }
    let flag_without_tag = db
        .scalar(
            "SELECT COUNT(*) FROM facility_rollup fr \
             WHERE fr.has_full_hookup = 1 AND NOT EXISTS (\
                SELECT 1 FROM facility_tags t \
                WHERE t.facility_id = fr.facility_id AND t.tag = 'FULL_HOOKUPS')",
        )
        .await?;
    if flag_without_tag > 0 {
        warn!(rows = flag_without_tag, "rollup full-hookup flag without tag");
        errors += 1;
    }

    if errors > 0 {
        warn!(errors, "classification validation reported errors");
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_conditions_developed() {
        let r = FacilityRollup {
            facility_id: "f1".to_string(),
            camping_type: "DEVELOPED".to_string(),
            camping_type_confidence: "HIGH".to_string(),
            surface_predominant: Some("PAVED".to_string()),
            campfire_yes_sites: 4,
            desc_elevation_ft: Some(6400),
            max_rv_length: Some(40),
            ..Default::default()
        };
        let c = build_conditions(&r);
        assert_eq!(c.road_access, "PAVED");
        assert_eq!(c.driveway_surface, "PAVED");
        assert_eq!(c.seasonal_status, "OPEN_YEAR_ROUND");
        assert_eq!(c.fire_status, "CAMPFIRES_ALLOWED");
        assert_eq!(c.elevation_ft, Some(6400));
        // Not dispersed/primitive: no boondock value
        assert_eq!(c.boondock_accessibility, None);
        assert_eq!(c.max_rv_length, Some(40));
    }

    #[test]
    fn test_build_conditions_dispersed() {
        let r = FacilityRollup {
            facility_id: "f2".to_string(),
            camping_type: "DISPERSED".to_string(),
            camping_type_confidence: "HIGH".to_string(),
            desc_road_4wd: true,
            ..Default::default()
        };
        let c = build_conditions(&r);
        assert_eq!(c.road_access, "4WD_REQUIRED");
        assert_eq!(c.boondock_accessibility.as_deref(), Some("ROUGH"));
        assert_eq!(c.seasonal_status, "UNKNOWN");
        assert_eq!(c.fire_status, "UNKNOWN");
    }
}
