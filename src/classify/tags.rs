//! Display tag generation
//!
//! An ordered battery of independent predicates over the rollup row, each
//! optionally appending a tag with a monotonically increasing display_order.
//! Evaluation order matches the category grouping order (WARNING first,
//! STYLE last) so tags render in a fixed, stable grouping. The hookup tier
//! (FULL > ELECTRIC > WATER) and the amperage tier (50A > 30A) are mutually
//! exclusive by construction; everything else may stack freely.

use crate::models::{FacilityRollup, FacilityTag, TagCategory};

struct TagWriter<'a> {
    facility_id: &'a str,
    next_order: i64,
    tags: Vec<FacilityTag>,
}

impl<'a> TagWriter<'a> {
    fn new(facility_id: &'a str) -> Self {
        Self {
            facility_id,
            next_order: 0,
            tags: Vec::new(),
        }
    }

    fn push(&mut self, tag: &str, category: TagCategory) {
        self.tags.push(FacilityTag {
            facility_id: self.facility_id.to_string(),
            tag: tag.to_string(),
            tag_category: category.as_str().to_string(),
            display_order: self.next_order,
        });
        self.next_order += 1;
    }
}

/// Compute the ordered tag set for one facility
pub fn compute_tags(r: &FacilityRollup) -> Vec<FacilityTag> {
    let mut w = TagWriter::new(&r.facility_id);

    // --- Warnings, shown first ---
    if r.desc_rv_not_recommended {
        w.push("RV_NOT_RECOMMENDED", TagCategory::Warning);
    }
    if matches!(
        r.site_access_predominant.as_deref(),
        Some("HIKE_IN") | Some("WALK_IN") | Some("BOAT_IN")
    ) && r.drive_in_sites == 0
    {
        w.push("NO_DRIVE_IN_ACCESS", TagCategory::Warning);
    }
    if r.desc_road_4wd {
        w.push("4WD_REQUIRED", TagCategory::Warning);
    }
    if r.desc_road_high_clearance {
        w.push("HIGH_CLEARANCE", TagCategory::Warning);
    }
    if r.max_rv_length.is_some_and(|len| len < 25) {
        w.push("LENGTH_RESTRICTED", TagCategory::Warning);
    }
    if r.desc_remote_no_cell {
        w.push("REMOTE_NO_CELL", TagCategory::Warning);
    }
    if r.desc_flood_risk {
        w.push("FLOOD_RISK", TagCategory::Warning);
    }

    // --- Seasonal ---
    if r.desc_seasonal_closure || r.desc_winter_closure {
        w.push("SEASONAL_CLOSURE", TagCategory::Seasonal);
    }
    if r.desc_mentions_snow {
        w.push("SNOW_AREA", TagCategory::Seasonal);
    }

    // --- Fire ---
    if r.desc_fire_restrictions {
        w.push("FIRE_RESTRICTIONS", TagCategory::Fire);
    }

    // --- Environment ---
    if r.desc_elevation_ft.is_some_and(|elev| elev >= 7000) {
        w.push("HIGH_ELEVATION", TagCategory::Environment);
    }

    // --- Rig size ---
    if r.max_rv_length.is_some_and(|len| len >= 45)
        && r.has_pullthrough
        && matches!(
            r.surface_predominant.as_deref(),
            Some("PAVED") | Some("GRAVEL") | Some("MIXED")
        )
    {
        w.push("BIG_RIG_FRIENDLY", TagCategory::RigSize);
    }
    if r.has_pullthrough {
        w.push("PULL_THROUGH", TagCategory::RigSize);
    }
    if r.backin_sites > 0 && r.pullthrough_sites == 0 {
        w.push("BACK_IN_ONLY", TagCategory::RigSize);
    }

    // --- Hookups: the tier is mutually exclusive ---
    if r.has_full_hookup {
        w.push("FULL_HOOKUPS", TagCategory::Hookup);
    } else if r.has_electric_hookup {
        w.push("ELECTRIC_HOOKUP", TagCategory::Hookup);
    } else if r.has_water_hookup {
        w.push("WATER_HOOKUP", TagCategory::Hookup);
    }

    if let Some(amps) = r.max_amps {
        if amps >= 50 {
            w.push("50_AMP", TagCategory::Hookup);
        } else if amps >= 30 {
            w.push("30_AMP", TagCategory::Hookup);
        }
    }

    if r.camping_type == "DEVELOPED" && !r.has_electric_hookup && !r.has_water_hookup {
        w.push("DRY_CAMPING", TagCategory::Hookup);
    }

    // --- Access roads ---
    if r.desc_road_paved || r.surface_predominant.as_deref() == Some("PAVED") {
        w.push("PAVED_ACCESS", TagCategory::Access);
    }
    if r.desc_road_gravel && !r.desc_road_paved {
        w.push("GRAVEL_ROAD", TagCategory::Access);
    }
    if r.desc_road_dirt && !r.desc_road_paved {
        w.push("DIRT_ROAD", TagCategory::Access);
    }

    // --- Camping style ---
    if r.camping_type == "DISPERSED" {
        w.push("BOONDOCKING", TagCategory::Style);
    }
    if r.camping_type == "PRIMITIVE" {
        w.push("PRIMITIVE", TagCategory::Style);
    }
    if r.desc_mentions_generator {
        w.push("GENERATOR_MENTIONED", TagCategory::Style);
    }
    if r.desc_mentions_dump_station {
        w.push("DUMP_STATION", TagCategory::Style);
    }
    if r.desc_mentions_potable_water {
        w.push("POTABLE_WATER", TagCategory::Style);
    }
    if r.desc_mentions_vault_toilet {
        w.push("VAULT_TOILET", TagCategory::Style);
    }
    if r.reservable == Some(true) {
        w.push("RESERVABLE", TagCategory::Style);
    }

    w.tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rollup() -> FacilityRollup {
        FacilityRollup {
            facility_id: "f1".to_string(),
            camping_type: "DEVELOPED".to_string(),
            camping_type_confidence: "HIGH".to_string(),
            ..Default::default()
        }
    }

    fn tag_names(tags: &[FacilityTag]) -> Vec<&str> {
        tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_full_hookups_only_with_flag() {
        let r = FacilityRollup {
            has_full_hookup: true,
            has_electric_hookup: true,
            has_water_hookup: true,
            ..rollup()
        };
        let tags = compute_tags(&r);
        assert!(tag_names(&tags).contains(&"FULL_HOOKUPS"));
        // Tier is exclusive: no lower hookup tag alongside FULL_HOOKUPS
        assert!(!tag_names(&tags).contains(&"ELECTRIC_HOOKUP"));
        assert!(!tag_names(&tags).contains(&"WATER_HOOKUP"));

        let r = rollup();
        assert!(!tag_names(&compute_tags(&r)).contains(&"FULL_HOOKUPS"));
    }

    #[test]
    fn test_hookup_tier() {
        let r = FacilityRollup {
            has_electric_hookup: true,
            has_water_hookup: true,
            ..rollup()
        };
        let tags = compute_tags(&r);
        assert!(tag_names(&tags).contains(&"ELECTRIC_HOOKUP"));
        assert!(!tag_names(&tags).contains(&"WATER_HOOKUP"));

        let r = FacilityRollup {
            has_water_hookup: true,
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"WATER_HOOKUP"));
    }

    #[test]
    fn test_amp_tier() {
        let r = FacilityRollup {
            max_amps: Some(50),
            ..rollup()
        };
        let tags = compute_tags(&r);
        assert!(tag_names(&tags).contains(&"50_AMP"));
        assert!(!tag_names(&tags).contains(&"30_AMP"));

        let r = FacilityRollup {
            max_amps: Some(30),
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"30_AMP"));

        let r = FacilityRollup {
            max_amps: Some(20),
            ..rollup()
        };
        let tags = compute_tags(&r);
        assert!(!tag_names(&tags).contains(&"50_AMP"));
        assert!(!tag_names(&tags).contains(&"30_AMP"));
    }

    #[test]
    fn test_warning_tags_are_independent_of_classification() {
        // A developed campground still carries its RV warning
        let r = FacilityRollup {
            has_electric_hookup: true,
            desc_rv_not_recommended: true,
            desc_road_gravel: true,
            ..rollup()
        };
        let tags = compute_tags(&r);
        let names = tag_names(&tags);
        assert!(names.contains(&"RV_NOT_RECOMMENDED"));
        assert!(names.contains(&"GRAVEL_ROAD"));
        assert!(names.contains(&"ELECTRIC_HOOKUP"));
    }

    #[test]
    fn test_big_rig_friendly_requirements() {
        let r = FacilityRollup {
            max_rv_length: Some(50),
            has_pullthrough: true,
            surface_predominant: Some("PAVED".to_string()),
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"BIG_RIG_FRIENDLY"));

        // Too short
        let r = FacilityRollup {
            max_rv_length: Some(40),
            has_pullthrough: true,
            surface_predominant: Some("PAVED".to_string()),
            ..rollup()
        };
        assert!(!tag_names(&compute_tags(&r)).contains(&"BIG_RIG_FRIENDLY"));

        // No surfaced driveways
        let r = FacilityRollup {
            max_rv_length: Some(50),
            has_pullthrough: true,
            ..rollup()
        };
        assert!(!tag_names(&compute_tags(&r)).contains(&"BIG_RIG_FRIENDLY"));
    }

    #[test]
    fn test_length_restricted_boundary() {
        let r = FacilityRollup {
            max_rv_length: Some(24),
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"LENGTH_RESTRICTED"));

        let r = FacilityRollup {
            max_rv_length: Some(25),
            ..rollup()
        };
        assert!(!tag_names(&compute_tags(&r)).contains(&"LENGTH_RESTRICTED"));

        // Unknown length is not restricted
        assert!(!tag_names(&compute_tags(&rollup())).contains(&"LENGTH_RESTRICTED"));
    }

    #[test]
    fn test_display_order_strictly_increases_in_category_order() {
        let r = FacilityRollup {
            desc_rv_not_recommended: true,
            desc_mentions_snow: true,
            desc_fire_restrictions: true,
            desc_elevation_ft: Some(8000),
            has_pullthrough: true,
            has_full_hookup: true,
            max_amps: Some(50),
            desc_road_paved: true,
            desc_mentions_dump_station: true,
            reservable: Some(true),
            ..rollup()
        };
        let tags = compute_tags(&r);
        for (i, tag) in tags.iter().enumerate() {
            assert_eq!(tag.display_order, i as i64);
        }
        // Category grouping order is fixed
        let categories: Vec<&str> = tags.iter().map(|t| t.tag_category.as_str()).collect();
        let order = [
            "WARNING",
            "SEASONAL",
            "FIRE",
            "ENVIRONMENT",
            "RIG_SIZE",
            "HOOKUP",
            "ACCESS",
            "STYLE",
        ];
        let positions: Vec<usize> = categories
            .iter()
            .map(|c| order.iter().position(|o| o == c).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_dry_camping_and_style() {
        let r = FacilityRollup {
            camping_type: "DEVELOPED".to_string(),
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"DRY_CAMPING"));

        let r = FacilityRollup {
            camping_type: "DISPERSED".to_string(),
            ..rollup()
        };
        let tags = compute_tags(&r);
        assert!(tag_names(&tags).contains(&"BOONDOCKING"));
        assert!(!tag_names(&tags).contains(&"DRY_CAMPING"));
    }

    #[test]
    fn test_no_drive_in_access() {
        let r = FacilityRollup {
            site_access_predominant: Some("HIKE_IN".to_string()),
            ..rollup()
        };
        assert!(tag_names(&compute_tags(&r)).contains(&"NO_DRIVE_IN_ACCESS"));

        let r = FacilityRollup {
            site_access_predominant: Some("HIKE_IN".to_string()),
            drive_in_sites: 1,
            ..rollup()
        };
        assert!(!tag_names(&compute_tags(&r)).contains(&"NO_DRIVE_IN_ACCESS"));
    }
}
