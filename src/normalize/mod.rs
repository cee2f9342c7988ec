//! Stage 1: Attribute Normalizer
//!
//! Pivots the raw EAV campsite attributes into flat typed rows, collapses
//! equipment names into canonical categories, and mines facility
//! descriptions for RV-relevant signals. Rewrites the three `norm_*` tables;
//! raw tables are never modified.

pub mod attrs;
pub mod description;
pub mod equipment;

use crate::error::Result;
use crate::models::{NormCampsite, NormFacility, RawAttribute, RawCampsite, RawFacility};
use crate::store::{Db, SCHEMA_VERSION};
use self::attrs::{
    parse_bool_attr, parse_capacity_rating, parse_driveway_entry, parse_driveway_grade,
    parse_driveway_surface, parse_electric, parse_full_hookup, parse_int_attr,
    parse_max_vehicle_length, parse_overhead_clearance, parse_sewer_hookup, parse_shade,
    parse_site_access, parse_water_hookup,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// Stage 1 result counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub campsites: usize,
    pub equipment_rows: usize,
    pub facilities: usize,
    pub validation_errors: i64,
}

/// The raw attribute values recognized for one campsite, keyed by the
/// [`attrs::PIVOT_ATTRS`] vocabulary. Duplicate rows for one attribute keep
/// the lexicographically greatest value so rebuilds are order-independent.
#[derive(Debug, Clone, Default)]
pub struct SiteAttrs {
    pub driveway_entry: Option<String>,
    pub driveway_surface: Option<String>,
    pub driveway_length: Option<String>,
    pub driveway_grade: Option<String>,
    pub water_hookup: Option<String>,
    pub sewer_hookup: Option<String>,
    pub electricity_hookup: Option<String>,
    pub full_hookup: Option<String>,
    pub max_vehicle_length: Option<String>,
    pub site_access: Option<String>,
    pub overhead_clearance: Option<String>,
    pub max_num_people: Option<String>,
    pub max_num_vehicles: Option<String>,
    pub capacity_rating: Option<String>,
    pub pets_allowed: Option<String>,
    pub campfire_allowed: Option<String>,
    pub shade: Option<String>,
}

impl SiteAttrs {
    fn slot(&mut self, attribute_name: &str) -> Option<&mut Option<String>> {
        match attribute_name {
            "Driveway Entry" => Some(&mut self.driveway_entry),
            "Driveway Surface" => Some(&mut self.driveway_surface),
            "Driveway Length" => Some(&mut self.driveway_length),
            "Driveway Grade" => Some(&mut self.driveway_grade),
            "Water Hookup" => Some(&mut self.water_hookup),
            "Sewer Hookup" => Some(&mut self.sewer_hookup),
            "Electricity Hookup" => Some(&mut self.electricity_hookup),
            "Full Hookup" => Some(&mut self.full_hookup),
            "Max Vehicle Length" => Some(&mut self.max_vehicle_length),
            "Site Access" => Some(&mut self.site_access),
            "Site Height/Overhead Clearance" => Some(&mut self.overhead_clearance),
            "Max Num of People" => Some(&mut self.max_num_people),
            "Max Num of Vehicles" => Some(&mut self.max_num_vehicles),
            "Capacity/Size Rating" => Some(&mut self.capacity_rating),
            "Pets Allowed" => Some(&mut self.pets_allowed),
            "Campfire Allowed" => Some(&mut self.campfire_allowed),
            "Shade" => Some(&mut self.shade),
            _ => None,
        }
    }

    /// Record an attribute value; on collision the greater value wins
    pub fn set(&mut self, attribute_name: &str, value: &str) {
        if let Some(slot) = self.slot(attribute_name) {
            match slot {
                Some(existing) if existing.as_str() >= value => {}
                _ => *slot = Some(value.to_string()),
            }
        }
    }
}

/// Group raw EAV rows by campsite, keeping only recognized attributes
pub fn pivot_attributes(rows: &[RawAttribute]) -> HashMap<String, SiteAttrs> {
    let mut by_site: HashMap<String, SiteAttrs> = HashMap::new();
    for row in rows {
        let Some(value) = row.attribute_value.as_deref() else {
            continue;
        };
        by_site
            .entry(row.campsite_id.clone())
            .or_default()
            .set(&row.attribute_name, value);
    }
    by_site
}

/// Build one normalized campsite row from the raw row and its attribute bag
pub fn build_norm_campsite(raw: &RawCampsite, attrs: &SiteAttrs) -> NormCampsite {
    let mut has_water = attrs.water_hookup.as_deref().and_then(parse_water_hookup);
    let mut has_sewer = attrs.sewer_hookup.as_deref().and_then(parse_sewer_hookup);

    let electric = attrs
        .electricity_hookup
        .as_deref()
        .map(parse_electric)
        .unwrap_or_default();
    let mut has_electric = electric.has_electric;
    let mut electric_amps = electric.amps;
    let mut max_amps = electric.max_amps;

    // "Full Hookup" is authoritative: it forces all three hookups present,
    // and the higher amperage across sources wins
    let (full_flag, full_amps) = attrs
        .full_hookup
        .as_deref()
        .map(parse_full_hookup)
        .unwrap_or((false, None));
    if full_flag {
        has_water = Some(true);
        has_sewer = Some(true);
        has_electric = Some(true);
        if let Some(fa) = full_amps {
            if max_amps.map_or(true, |m| fa > m) {
                max_amps = Some(fa);
                electric_amps = Some(fa.to_string());
            }
        }
    }

    let has_full = has_water == Some(true) && has_sewer == Some(true) && has_electric == Some(true);

    let (max_vlen, max_vlen_raw) = attrs
        .max_vehicle_length
        .as_deref()
        .map(parse_max_vehicle_length)
        .unwrap_or((None, None));

    NormCampsite {
        campsite_id: raw.campsite_id.clone(),
        facility_id: raw.facility_id.clone(),
        campsite_type: raw.campsite_type.clone(),
        type_of_use: raw.type_of_use.clone(),
        campsite_accessible: raw.campsite_accessible,
        campsite_reservable: raw.campsite_reservable,

        driveway_entry: attrs
            .driveway_entry
            .as_deref()
            .and_then(parse_driveway_entry)
            .map(|e| e.as_str().to_string()),
        driveway_surface: attrs
            .driveway_surface
            .as_deref()
            .and_then(parse_driveway_surface)
            .map(|s| s.as_str().to_string()),
        driveway_length_ft: attrs.driveway_length.as_deref().and_then(parse_int_attr),
        driveway_grade: attrs
            .driveway_grade
            .as_deref()
            .and_then(parse_driveway_grade)
            .map(|g| g.as_str().to_string()),

        has_water_hookup: has_water,
        has_sewer_hookup: has_sewer,
        has_electric_hookup: has_electric,
        electric_amps,
        max_electric_amps: max_amps,
        has_full_hookup: has_full,

        max_vehicle_length: max_vlen,
        max_vehicle_length_raw: max_vlen_raw,

        site_access: attrs
            .site_access
            .as_deref()
            .and_then(parse_site_access)
            .map(|a| a.as_str().to_string()),
        overhead_clearance_ft: attrs
            .overhead_clearance
            .as_deref()
            .and_then(parse_overhead_clearance),

        max_num_people: attrs.max_num_people.as_deref().and_then(parse_int_attr),
        max_num_vehicles: attrs.max_num_vehicles.as_deref().and_then(parse_int_attr),
        capacity_rating: attrs
            .capacity_rating
            .as_deref()
            .and_then(parse_capacity_rating)
            .map(|c| c.as_str().to_string()),

        pets_allowed: attrs.pets_allowed.as_deref().and_then(parse_bool_attr),
        campfire_allowed: attrs.campfire_allowed.as_deref().and_then(parse_bool_attr),
        shade: attrs
            .shade
            .as_deref()
            .and_then(parse_shade)
            .map(|s| s.as_str().to_string()),
    }
}

/// Build one normalized facility row: coordinate quality plus description
/// signals. Raw 0/0 coordinates are the upstream "missing" sentinel.
pub fn build_norm_facility(raw: &RawFacility) -> NormFacility {
    let lat = raw.facility_latitude.unwrap_or(0.0);
    let lon = raw.facility_longitude.unwrap_or(0.0);
    let coords_valid = lat != 0.0 || lon != 0.0;

    let mut row = NormFacility {
        facility_id: raw.facility_id.clone(),
        coords_valid,
        facility_latitude_clean: coords_valid.then_some(lat),
        facility_longitude_clean: coords_valid.then_some(lon),
        ..Default::default()
    };
    description::mine_description(raw.facility_description.as_deref().unwrap_or(""), &mut row);
    row
}

/// Run the normalization stage end to end
pub async fn run(db: &Db) -> Result<NormalizeStats> {
    info!("Normalizing campsite attributes");
    let raw_campsites = db.load_raw_campsites().await?;
    let raw_attributes = db.load_raw_attributes().await?;
    let attr_bags = pivot_attributes(&raw_attributes);
    let empty = SiteAttrs::default();
    let campsites: Vec<NormCampsite> = raw_campsites
        .iter()
        .map(|raw| build_norm_campsite(raw, attr_bags.get(&raw.campsite_id).unwrap_or(&empty)))
        .collect();
    db.replace_norm_campsites(&campsites).await?;
    info!(rows = campsites.len(), "norm_campsite rebuilt");

    info!("Normalizing equipment");
    let raw_equipment = db.load_raw_equipment().await?;
    let equipment_rows = equipment::collapse_equipment(&raw_equipment);
    db.replace_norm_equipment(&equipment_rows).await?;
    info!(
        raw = raw_equipment.len(),
        rows = equipment_rows.len(),
        "norm_campsite_equipment rebuilt"
    );

    info!("Normalizing facility descriptions");
    let raw_facilities = db.load_raw_facilities().await?;
    let facilities: Vec<NormFacility> = raw_facilities.iter().map(build_norm_facility).collect();
    db.replace_norm_facilities(&facilities).await?;
    info!(rows = facilities.len(), "norm_facility rebuilt");

    db.set_meta(&[
        ("schema_version", SCHEMA_VERSION.to_string()),
        ("normalize_last_run", chrono::Utc::now().to_rfc3339()),
        ("norm_campsite_count", campsites.len().to_string()),
        (
            "norm_campsite_equipment_count",
            equipment_rows.len().to_string(),
        ),
        ("norm_facility_count", facilities.len().to_string()),
    ])
    .await?;

    let validation_errors = validate(db).await?;

    Ok(NormalizeStats {
        campsites: campsites.len(),
        equipment_rows: equipment_rows.len(),
        facilities: facilities.len(),
        validation_errors,
    })
}

/// Advisory post-build checks; failures are reported, never rolled back
async fn validate(db: &Db) -> Result<i64> {
    let mut errors = 0;

    let raw = db.table_count("campsites").await?;
    let norm = db.table_count("norm_campsite").await?;
    if raw != norm {
        warn!(raw, norm, "row count mismatch: campsites vs norm_campsite");
        errors += 1;
    }

    let bad_entry = db
        .scalar(
            "SELECT COUNT(*) FROM norm_campsite WHERE driveway_entry IS NOT NULL \
             AND driveway_entry NOT IN ('BACK_IN','PULL_THROUGH','PARALLEL')",
        )
        .await?;
    if bad_entry > 0 {
        warn!(rows = bad_entry, "driveway_entry outside the allowed domain");
        errors += 1;
    }

    for col in [
        "has_water_hookup",
        "has_sewer_hookup",
        "has_electric_hookup",
    ] {
        let bad = db
            .scalar(&format!(
                "SELECT COUNT(*) FROM norm_campsite WHERE {col} IS NOT NULL AND {col} NOT IN (0,1)"
            ))
            .await?;
        if bad > 0 {
            warn!(column = col, rows = bad, "hookup value outside 0/1/NULL");
            errors += 1;
        }
    }

    let bad_len = db
        .scalar(
            "SELECT COUNT(*) FROM norm_campsite WHERE max_vehicle_length IS NOT NULL \
             AND (max_vehicle_length < 1 OR max_vehicle_length > 150)",
        )
        .await?;
    if bad_len > 0 {
        warn!(rows = bad_len, "max_vehicle_length outside 1-150 ft");
        errors += 1;
    }

    let zero_coords = db
        .scalar("SELECT COUNT(*) FROM norm_facility WHERE coords_valid = 0")
        .await?;
    info!(facilities = zero_coords, "facilities with missing coordinates");

    if errors > 0 {
        warn!(errors, "normalization validation reported errors");
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_site(id: &str) -> RawCampsite {
        RawCampsite {
            campsite_id: id.to_string(),
            facility_id: "f1".to_string(),
            campsite_type: Some("STANDARD NONELECTRIC".to_string()),
            type_of_use: Some("Overnight".to_string()),
            campsite_accessible: None,
            campsite_reservable: Some(true),
        }
    }

    #[test]
    fn test_hookup_scenario_sewer_blocks_full() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Water Hookup", "Yes");
        attrs.set("Sewer Hookup", "No");
        attrs.set("Electricity Hookup", "30/50 amps");

        let row = build_norm_campsite(&raw_site("c1"), &attrs);
        assert_eq!(row.has_water_hookup, Some(true));
        assert_eq!(row.has_sewer_hookup, Some(false));
        assert_eq!(row.has_electric_hookup, Some(true));
        assert_eq!(row.max_electric_amps, Some(50));
        assert_eq!(row.electric_amps.as_deref(), Some("50/30"));
        assert!(!row.has_full_hookup);
    }

    #[test]
    fn test_full_hookup_is_authoritative() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Electricity Hookup", "30 amps");
        attrs.set("Full Hookup", "50");

        let row = build_norm_campsite(&raw_site("c1"), &attrs);
        assert_eq!(row.has_water_hookup, Some(true));
        assert_eq!(row.has_sewer_hookup, Some(true));
        assert_eq!(row.has_electric_hookup, Some(true));
        // Higher amperage across sources wins
        assert_eq!(row.max_electric_amps, Some(50));
        assert_eq!(row.electric_amps.as_deref(), Some("50"));
        assert!(row.has_full_hookup);
    }

    #[test]
    fn test_full_hookup_lower_amps_does_not_downgrade() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Electricity Hookup", "50 amps");
        attrs.set("Full Hookup", "30");

        let row = build_norm_campsite(&raw_site("c1"), &attrs);
        assert_eq!(row.max_electric_amps, Some(50));
        assert_eq!(row.electric_amps.as_deref(), Some("50"));
    }

    #[test]
    fn test_malformed_attributes_degrade_to_null() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Driveway Entry", "???");
        attrs.set("Max Vehicle Length", "enormous");
        attrs.set("Electricity Hookup", "call ranger");

        let row = build_norm_campsite(&raw_site("c1"), &attrs);
        assert_eq!(row.driveway_entry, None);
        assert_eq!(row.max_vehicle_length, None);
        // Original string retained for audit
        assert_eq!(row.max_vehicle_length_raw.as_deref(), Some("enormous"));
        assert_eq!(row.has_electric_hookup, None);
    }

    #[test]
    fn test_attr_bag_collision_keeps_greater_value() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Water Hookup", "No");
        attrs.set("Water Hookup", "Yes");
        assert_eq!(attrs.water_hookup.as_deref(), Some("Yes"));
        // Reversed arrival order resolves identically
        let mut attrs = SiteAttrs::default();
        attrs.set("Water Hookup", "Yes");
        attrs.set("Water Hookup", "No");
        assert_eq!(attrs.water_hookup.as_deref(), Some("Yes"));
    }

    #[test]
    fn test_unrecognized_attribute_ignored() {
        let mut attrs = SiteAttrs::default();
        attrs.set("Checkout Time", "noon");
        let row = build_norm_campsite(&raw_site("c1"), &attrs);
        assert_eq!(row.driveway_entry, None);
    }

    #[test]
    fn test_facility_zero_coords_sentinel() {
        let raw = RawFacility {
            facility_id: "f1".to_string(),
            facility_name: Some("Test".to_string()),
            facility_type: Some("Campground".to_string()),
            org_abbrev: None,
            org_name: None,
            parent_rec_area_id: None,
            reservable: None,
            facility_latitude: Some(0.0),
            facility_longitude: Some(0.0),
            facility_description: Some("<p>RV sites with full hookups.</p>".to_string()),
        };
        let row = build_norm_facility(&raw);
        assert!(!row.coords_valid);
        assert_eq!(row.facility_latitude_clean, None);
        assert!(row.desc_mentions_rv);
        assert!(row.desc_mentions_full_hookup);

        let raw_valid = RawFacility {
            facility_latitude: Some(44.5),
            facility_longitude: Some(-110.3),
            ..raw
        };
        let row = build_norm_facility(&raw_valid);
        assert!(row.coords_valid);
        assert_eq!(row.facility_latitude_clean, Some(44.5));
    }
}
