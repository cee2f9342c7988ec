//! Stage 2: Facility Aggregator
//!
//! Aggregates normalized per-site rows into one `facility_rollup` row per
//! facility, covering every facility_id seen in either the raw facility
//! table or the normalized site table (orphan coverage). Resolves
//! cross-source conflicts and classifies the camping style.

pub mod classify;

use crate::error::{Error, Result};
use crate::models::{
    FacilityActivity, FacilityRollup, NormCampsite, NormEquipment, NormFacility, RawFacility,
    SiteAccess, SurfacePredominant,
};
use crate::store::Db;
use self::classify::{classify_camping_type, classify_orphan, ClassifierFacts};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, warn};

/// Equipment categories that make a site RV-capable
pub const RV_EQUIPMENT: [&str; 6] = [
    "RV",
    "TRAILER",
    "FIFTH_WHEEL",
    "PICKUP_CAMPER",
    "POP_UP",
    "CAMPER_VAN",
];

/// Equipment categories whose reported length bounds RV size
pub const RV_LENGTH_EQUIPMENT: [&str; 3] = ["RV", "TRAILER", "FIFTH_WHEEL"];

/// Cabin-like campsite types (exact raw spellings)
const CABIN_TYPES: [&str; 8] = [
    "CABIN NONELECTRIC",
    "CABIN ELECTRIC",
    "YURT",
    "LOOKOUT",
    "OVERNIGHT SHELTER ELECTRIC",
    "OVERNIGHT SHELTER NONELECTRIC",
    "SHELTER NONELECTRIC",
    "SHELTER ELECTRIC",
];

const WALK_HIKE_BOAT_TYPES: [&str; 3] = ["WALK TO", "HIKE TO", "BOAT IN"];

/// Stage 2 result counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollupStats {
    pub facilities: usize,
    pub orphans: usize,
    pub validation_errors: i64,
}

/// Per-facility sums over normalized campsite rows
#[derive(Debug, Clone, Default)]
pub struct SiteAggregate {
    pub total: i64,
    pub overnight: i64,
    pub day_use: i64,

    pub rv_type: i64,
    pub tent_only: i64,
    pub standard: i64,
    pub group_sites: i64,
    pub cabin: i64,
    pub equestrian: i64,
    pub walk_hike_boat: i64,
    pub management: i64,

    pub water_sites: i64,
    pub sewer_sites: i64,
    pub electric_sites: i64,
    pub full_sites: i64,
    pub max_amps: Option<i64>,

    pub pullthrough: i64,
    pub backin: i64,
    pub parallel: i64,
    pub paved: i64,
    pub gravel: i64,

    pub max_vehicle_length: Option<i64>,

    pub drive_in: i64,
    pub walk_in: i64,
    pub hike_in: i64,
    pub boat_in: i64,

    pub campfire_yes: i64,
    pub campfire_no: i64,
}

fn max_opt(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (Some(x), None) => Some(x),
        (None, y) => y,
    }
}

/// Group normalized campsite rows by facility
pub fn aggregate_sites(sites: &[NormCampsite]) -> BTreeMap<String, SiteAggregate> {
    let mut by_facility: BTreeMap<String, SiteAggregate> = BTreeMap::new();

    for site in sites {
        let agg = by_facility.entry(site.facility_id.clone()).or_default();
        agg.total += 1;

        match site.type_of_use.as_deref() {
            Some("Overnight") => agg.overnight += 1,
            Some("Day") => agg.day_use += 1,
            _ => {}
        }

        if let Some(ct) = site.campsite_type.as_deref() {
            let upper = ct.to_uppercase();
            if upper.contains("RV") {
                agg.rv_type += 1;
            }
            if upper.contains("TENT ONLY") {
                agg.tent_only += 1;
            }
            if upper.starts_with("STANDARD") {
                agg.standard += 1;
            }
            if upper.starts_with("GROUP") {
                agg.group_sites += 1;
            }
            if CABIN_TYPES.contains(&ct) {
                agg.cabin += 1;
            }
            if upper.starts_with("EQUESTRIAN") {
                agg.equestrian += 1;
            }
            if WALK_HIKE_BOAT_TYPES.contains(&ct) {
                agg.walk_hike_boat += 1;
            }
            if ct == "MANAGEMENT" {
                agg.management += 1;
            }
        }

        if site.has_water_hookup == Some(true) {
            agg.water_sites += 1;
        }
        if site.has_sewer_hookup == Some(true) {
            agg.sewer_sites += 1;
        }
        if site.has_electric_hookup == Some(true) {
            agg.electric_sites += 1;
        }
        if site.has_full_hookup {
            agg.full_sites += 1;
        }
        agg.max_amps = max_opt(agg.max_amps, site.max_electric_amps);

        match site.driveway_entry.as_deref() {
            Some("PULL_THROUGH") => agg.pullthrough += 1,
            Some("BACK_IN") => agg.backin += 1,
            Some("PARALLEL") => agg.parallel += 1,
            _ => {}
        }
        match site.driveway_surface.as_deref() {
            Some("PAVED") => agg.paved += 1,
            Some("GRAVEL") => agg.gravel += 1,
            _ => {}
        }

        agg.max_vehicle_length = max_opt(agg.max_vehicle_length, site.max_vehicle_length);

        match site.site_access.as_deref() {
            Some("DRIVE_IN") => agg.drive_in += 1,
            Some("WALK_IN") => agg.walk_in += 1,
            Some("HIKE_IN") => agg.hike_in += 1,
            Some("BOAT_IN") => agg.boat_in += 1,
            _ => {}
        }

        match site.campfire_allowed {
            Some(true) => agg.campfire_yes += 1,
            Some(false) => agg.campfire_no += 1,
            None => {}
        }
    }

    by_facility
}

/// Per-facility equipment-derived facts
#[derive(Debug, Clone, Default)]
pub struct EquipmentAggregate {
    pub sites_accepting_rv: i64,
    pub sites_accepting_tent: i64,
    pub max_rv_length: Option<i64>,
}

/// Count distinct sites per facility that accept RV-family or tent
/// equipment, and the maximum RV-family length
pub fn aggregate_equipment(
    rows: &[NormEquipment],
    site_facility: &HashMap<String, String>,
) -> BTreeMap<String, EquipmentAggregate> {
    let mut rv_sites: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    let mut tent_sites: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    let mut max_len: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows {
        // Equipment for sites with no normalized row has no facility to land on
        let Some(facility_id) = site_facility.get(&row.campsite_id) else {
            continue;
        };
        if RV_EQUIPMENT.contains(&row.equipment_category.as_str()) {
            rv_sites
                .entry(facility_id.clone())
                .or_default()
                .insert(&row.campsite_id);
        }
        if row.equipment_category == "TENT" {
            tent_sites
                .entry(facility_id.clone())
                .or_default()
                .insert(&row.campsite_id);
        }
        if RV_LENGTH_EQUIPMENT.contains(&row.equipment_category.as_str()) {
            if let Some(len) = row.max_length_ft {
                let entry = max_len.entry(facility_id.clone()).or_insert(len);
                *entry = (*entry).max(len);
            }
        }
    }

    let mut result: BTreeMap<String, EquipmentAggregate> = BTreeMap::new();
    for (fid, sites) in rv_sites {
        result.entry(fid).or_default().sites_accepting_rv = sites.len() as i64;
    }
    for (fid, sites) in tent_sites {
        result.entry(fid).or_default().sites_accepting_tent = sites.len() as i64;
    }
    for (fid, len) in max_len {
        result.entry(fid).or_default().max_rv_length = Some(len);
    }
    result
}

/// Per-facility activity signals (exact upstream activity names)
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityFlags {
    pub camping: bool,
    pub rv: bool,
    pub dispersed: bool,
}

pub fn aggregate_activities(rows: &[FacilityActivity]) -> BTreeMap<String, ActivityFlags> {
    let mut by_facility: BTreeMap<String, ActivityFlags> = BTreeMap::new();
    for row in rows {
        let flags = by_facility.entry(row.facility_id.clone()).or_default();
        match row.activity_name.as_str() {
            "CAMPING" => flags.camping = true,
            "RECREATIONAL VEHICLES" => flags.rv = true,
            "Dispersed Camping" => flags.dispersed = true,
            _ => {}
        }
    }
    by_facility
}

/// Majority vote between paved and gravel; an exact tie is MIXED
pub fn surface_predominant(paved: i64, gravel: i64) -> Option<SurfacePredominant> {
    if paved > 0 && gravel > 0 {
        Some(match paved.cmp(&gravel) {
            std::cmp::Ordering::Greater => SurfacePredominant::Paved,
            std::cmp::Ordering::Less => SurfacePredominant::Gravel,
            std::cmp::Ordering::Equal => SurfacePredominant::Mixed,
        })
    } else if paved > 0 {
        Some(SurfacePredominant::Paved)
    } else if gravel > 0 {
        Some(SurfacePredominant::Gravel)
    } else {
        None
    }
}

/// Majority vote among the nonzero access buckets; ties break by the fixed
/// priority DRIVE_IN > WALK_IN > HIKE_IN > BOAT_IN so results are
/// reproducible across runs
pub fn access_predominant(
    drive_in: i64,
    walk_in: i64,
    hike_in: i64,
    boat_in: i64,
) -> Option<SiteAccess> {
    let buckets = [
        (SiteAccess::DriveIn, drive_in),
        (SiteAccess::WalkIn, walk_in),
        (SiteAccess::HikeIn, hike_in),
        (SiteAccess::BoatIn, boat_in),
    ];
    let best = buckets.iter().filter(|(_, n)| *n > 0).max_by_key(|(access, n)| {
        // Higher count wins; on equal counts the earlier (more permissive)
        // mode wins via the reversed enum order
        (*n, std::cmp::Reverse(*access))
    });
    best.map(|(access, _)| *access)
}

/// Best-of-three vehicle length resolution, clamped to the 150 ft bound
fn resolve_max_rv_length(
    attr: Option<i64>,
    equip: Option<i64>,
    desc: Option<i64>,
) -> Option<i64> {
    let max = [attr, equip, desc]
        .into_iter()
        .flatten()
        .filter(|v| *v > 0)
        .max()?;
    Some(max.min(150))
}

/// Build the rollup row for a facility present in the raw facility table
pub fn build_facility_row(
    raw: &RawFacility,
    nf: Option<&NormFacility>,
    agg: Option<&SiteAggregate>,
    equip: Option<&EquipmentAggregate>,
    act: ActivityFlags,
) -> FacilityRollup {
    let default_agg = SiteAggregate::default();
    let agg = agg.unwrap_or(&default_agg);
    let default_equip = EquipmentAggregate::default();
    let equip = equip.unwrap_or(&default_equip);
    let default_nf = NormFacility::default();
    let nf = nf.unwrap_or(&default_nf);

    // Structural hookup presence, enriched by description mentions: the
    // per-site data is frequently incomplete, so a description mention is
    // deliberately enough to flip a hookup on (bias toward false positives)
    let has_water = agg.water_sites > 0 || nf.desc_mentions_water_hookup;
    let has_sewer = agg.sewer_sites > 0 || nf.desc_mentions_sewer;
    let has_electric = agg.electric_sites > 0 || nf.desc_mentions_electric;
    let has_full = agg.full_sites > 0 || nf.desc_mentions_full_hookup;
    let has_pullthrough = agg.pullthrough > 0 || nf.desc_mentions_pull_through;

    let surface = surface_predominant(agg.paved, agg.gravel);
    let access = access_predominant(agg.drive_in, agg.walk_in, agg.hike_in, agg.boat_in);
    let max_rv = resolve_max_rv_length(
        agg.max_vehicle_length,
        equip.max_rv_length,
        nf.desc_max_rv_length,
    );

    let facts = ClassifierFacts {
        total_campsites: agg.total,
        overnight_sites: agg.overnight,
        day_use_sites: agg.day_use,
        facility_type: raw.facility_type.as_deref(),
        org_abbrev: raw.org_abbrev.as_deref(),
        has_water_hookup: has_water,
        has_sewer_hookup: has_sewer,
        has_electric_hookup: has_electric,
        has_full_hookup: has_full,
        has_pullthrough,
        paved_sites: agg.paved,
        gravel_sites: agg.gravel,
        drive_in_sites: agg.drive_in,
        sites_accepting_rv: equip.sites_accepting_rv,
        desc_mentions_hookups: nf.desc_mentions_hookups,
        desc_mentions_full_hookup: nf.desc_mentions_full_hookup,
        desc_mentions_electric: nf.desc_mentions_electric,
        desc_mentions_dump_station: nf.desc_mentions_dump_station,
        desc_mentions_dispersed: nf.desc_mentions_dispersed,
        desc_mentions_primitive: nf.desc_mentions_primitive,
        desc_mentions_vault_toilet: nf.desc_mentions_vault_toilet,
        desc_road_dirt: nf.desc_road_dirt,
        desc_road_gravel: nf.desc_road_gravel,
        has_camping_activity: act.camping,
        has_dispersed_activity: act.dispersed,
    };
    let (camping_type, confidence) = classify_camping_type(&facts);

    FacilityRollup {
        facility_id: raw.facility_id.clone(),
        facility_name: raw.facility_name.clone(),
        facility_type: raw.facility_type.clone(),
        org_abbrev: raw.org_abbrev.clone(),
        org_name: raw.org_name.clone(),
        parent_rec_area_id: raw.parent_rec_area_id.clone(),
        reservable: raw.reservable,

        latitude: nf.facility_latitude_clean,
        longitude: nf.facility_longitude_clean,
        coords_valid: nf.coords_valid,

        total_campsites: agg.total,
        overnight_sites: agg.overnight,
        day_use_sites: agg.day_use,

        rv_type_sites: agg.rv_type,
        tent_only_sites: agg.tent_only,
        standard_sites: agg.standard,
        group_sites: agg.group_sites,
        cabin_sites: agg.cabin,
        equestrian_sites: agg.equestrian,
        walk_hike_boat_sites: agg.walk_hike_boat,
        management_sites: agg.management,

        sites_accepting_rv: equip.sites_accepting_rv,
        sites_accepting_tent: equip.sites_accepting_tent,

        has_water_hookup: has_water,
        has_sewer_hookup: has_sewer,
        has_electric_hookup: has_electric,
        has_full_hookup: has_full,
        water_hookup_sites: agg.water_sites,
        sewer_hookup_sites: agg.sewer_sites,
        electric_hookup_sites: agg.electric_sites,
        full_hookup_sites: agg.full_sites,
        max_amps: agg.max_amps,

        has_pullthrough,
        pullthrough_sites: agg.pullthrough,
        backin_sites: agg.backin,
        parallel_sites: agg.parallel,
        paved_sites: agg.paved,
        gravel_sites: agg.gravel,
        surface_predominant: surface.map(|s| s.as_str().to_string()),

        max_rv_length: max_rv,
        max_rv_length_equip: equip.max_rv_length,
        max_rv_length_attr: agg.max_vehicle_length,
        max_rv_length_desc: nf.desc_max_rv_length,

        site_access_predominant: access.map(|a| a.as_str().to_string()),
        drive_in_sites: agg.drive_in,
        walk_in_sites: agg.walk_in,
        hike_in_sites: agg.hike_in,
        boat_in_sites: agg.boat_in,

        desc_mentions_rv: nf.desc_mentions_rv,
        desc_mentions_hookups: nf.desc_mentions_hookups,
        desc_mentions_full_hookup: nf.desc_mentions_full_hookup,
        desc_mentions_electric: nf.desc_mentions_electric,
        desc_mentions_dump_station: nf.desc_mentions_dump_station,
        desc_mentions_pull_through: nf.desc_mentions_pull_through,
        desc_mentions_generator: nf.desc_mentions_generator,
        desc_rv_not_recommended: nf.desc_rv_not_recommended,
        desc_road_paved: nf.desc_road_paved,
        desc_road_gravel: nf.desc_road_gravel,
        desc_road_dirt: nf.desc_road_dirt,
        desc_road_high_clearance: nf.desc_road_high_clearance,
        desc_road_4wd: nf.desc_road_4wd,
        desc_mentions_dispersed: nf.desc_mentions_dispersed,
        desc_mentions_primitive: nf.desc_mentions_primitive,
        desc_mentions_vault_toilet: nf.desc_mentions_vault_toilet,
        desc_mentions_potable_water: nf.desc_mentions_potable_water,

        desc_seasonal_closure: nf.desc_seasonal_closure,
        desc_winter_closure: nf.desc_winter_closure,
        desc_mentions_snow: nf.desc_mentions_snow,
        desc_fire_restrictions: nf.desc_fire_restrictions,
        desc_mentions_elevation: nf.desc_mentions_elevation,
        desc_elevation_ft: nf.desc_elevation_ft,
        desc_remote_no_cell: nf.desc_remote_no_cell,
        desc_flood_risk: nf.desc_flood_risk,

        campfire_yes_sites: agg.campfire_yes,
        campfire_no_sites: agg.campfire_no,

        has_camping_activity: act.camping,
        has_rv_activity: act.rv,
        has_dispersed_activity: act.dispersed,

        camping_type: camping_type.as_str().to_string(),
        camping_type_confidence: confidence.as_str().to_string(),
    }
}

/// Build a minimal rollup row for an orphan facility (sites exist but no
/// facility record), classified by the reduced 4-branch rules
pub fn build_orphan_row(
    facility_id: &str,
    agg: &SiteAggregate,
    equip: Option<&EquipmentAggregate>,
    act: ActivityFlags,
) -> FacilityRollup {
    let default_equip = EquipmentAggregate::default();
    let equip = equip.unwrap_or(&default_equip);

    let has_water = agg.water_sites > 0;
    let has_sewer = agg.sewer_sites > 0;
    let has_electric = agg.electric_sites > 0;
    let (camping_type, confidence) = classify_orphan(
        agg.total,
        agg.overnight,
        has_electric || has_water || has_sewer,
    );

    FacilityRollup {
        facility_id: facility_id.to_string(),

        total_campsites: agg.total,
        overnight_sites: agg.overnight,
        day_use_sites: agg.day_use,

        rv_type_sites: agg.rv_type,
        tent_only_sites: agg.tent_only,
        standard_sites: agg.standard,
        group_sites: agg.group_sites,
        cabin_sites: agg.cabin,
        equestrian_sites: agg.equestrian,
        walk_hike_boat_sites: agg.walk_hike_boat,
        management_sites: agg.management,

        sites_accepting_rv: equip.sites_accepting_rv,
        sites_accepting_tent: equip.sites_accepting_tent,

        has_water_hookup: has_water,
        has_sewer_hookup: has_sewer,
        has_electric_hookup: has_electric,
        has_full_hookup: agg.full_sites > 0,
        water_hookup_sites: agg.water_sites,
        sewer_hookup_sites: agg.sewer_sites,
        electric_hookup_sites: agg.electric_sites,
        full_hookup_sites: agg.full_sites,
        max_amps: agg.max_amps,

        has_pullthrough: agg.pullthrough > 0,
        pullthrough_sites: agg.pullthrough,
        backin_sites: agg.backin,
        parallel_sites: agg.parallel,
        paved_sites: agg.paved,
        gravel_sites: agg.gravel,
        surface_predominant: surface_predominant(agg.paved, agg.gravel)
            .map(|s| s.as_str().to_string()),

        max_rv_length: resolve_max_rv_length(agg.max_vehicle_length, equip.max_rv_length, None),
        max_rv_length_equip: equip.max_rv_length,
        max_rv_length_attr: agg.max_vehicle_length,
        max_rv_length_desc: None,

        site_access_predominant: access_predominant(
            agg.drive_in,
            agg.walk_in,
            agg.hike_in,
            agg.boat_in,
        )
        .map(|a| a.as_str().to_string()),
        drive_in_sites: agg.drive_in,
        walk_in_sites: agg.walk_in,
        hike_in_sites: agg.hike_in,
        boat_in_sites: agg.boat_in,

        campfire_yes_sites: agg.campfire_yes,
        campfire_no_sites: agg.campfire_no,

        has_camping_activity: act.camping,
        has_rv_activity: act.rv,
        has_dispersed_activity: act.dispersed,

        camping_type: camping_type.as_str().to_string(),
        camping_type_confidence: confidence.as_str().to_string(),

        ..Default::default()
    }
}

/// Run the rollup stage end to end
pub async fn run(db: &Db) -> Result<RollupStats> {
    // Pre-flight: stage 1 output must exist
    for table in ["norm_campsite", "norm_campsite_equipment", "norm_facility"] {
        if db.table_count(table).await? == 0 {
            return Err(Error::StageNotReady(table));
        }
    }

    info!("Aggregating campsites by facility");
    let sites = db.load_norm_campsites().await?;
    let site_aggs = aggregate_sites(&sites);

    let site_facility: HashMap<String, String> = sites
        .iter()
        .map(|s| (s.campsite_id.clone(), s.facility_id.clone()))
        .collect();
    let equipment = db.load_norm_equipment().await?;
    let equip_aggs = aggregate_equipment(&equipment, &site_facility);

    let activities = db.load_facility_activities().await?;
    let activity_flags = aggregate_activities(&activities);

    let norm_facilities: BTreeMap<String, NormFacility> = db
        .load_norm_facilities()
        .await?
        .into_iter()
        .map(|nf| (nf.facility_id.clone(), nf))
        .collect();

    let raw_facilities = db.load_raw_facilities().await?;
    info!(facilities = raw_facilities.len(), "building rollup rows");

    let mut rows: Vec<FacilityRollup> = Vec::with_capacity(raw_facilities.len());
    let mut known: BTreeSet<&str> = BTreeSet::new();
    for raw in &raw_facilities {
        known.insert(&raw.facility_id);
        rows.push(build_facility_row(
            raw,
            norm_facilities.get(&raw.facility_id),
            site_aggs.get(&raw.facility_id),
            equip_aggs.get(&raw.facility_id),
            activity_flags
                .get(&raw.facility_id)
                .copied()
                .unwrap_or_default(),
        ));
    }

    // Orphan facilities: referenced by sites but absent from the facility table
    let mut orphans = 0usize;
    for (fid, agg) in &site_aggs {
        if known.contains(fid.as_str()) {
            continue;
        }
        orphans += 1;
        rows.push(build_orphan_row(
            fid,
            agg,
            equip_aggs.get(fid),
            activity_flags.get(fid).copied().unwrap_or_default(),
        ));
    }
    if orphans > 0 {
        info!(orphans, "added orphan facility rows");
    }

    db.replace_rollups(&rows).await?;
    info!(rows = rows.len(), "facility_rollup rebuilt");

    db.set_meta(&[
        ("rollup_last_run", chrono::Utc::now().to_rfc3339()),
        ("rollup_count", rows.len().to_string()),
    ])
    .await?;

    let validation_errors = validate(db).await?;

    Ok(RollupStats {
        facilities: rows.len(),
        orphans,
        validation_errors,
    })
}

/// Advisory post-build checks over the committed rollup
async fn validate(db: &Db) -> Result<i64> {
    let mut errors = 0;

    let facilities = db.table_count("facilities").await?;
    let orphans = db
        .scalar(
            "SELECT COUNT(DISTINCT facility_id) FROM norm_campsite \
             WHERE facility_id NOT IN (SELECT facility_id FROM facilities)",
        )
        .await?;
    let rollups = db.table_count("facility_rollup").await?;
    if facilities + orphans != rollups {
        warn!(
            facilities,
            orphans, rollups, "rollup row count does not match facilities plus orphans"
        );
        errors += 1;
    }

    let site_count = db.table_count("norm_campsite").await?;
    let rollup_sum = db
        .scalar("SELECT SUM(total_campsites) FROM facility_rollup")
        .await?;
    if site_count != rollup_sum {
        warn!(site_count, rollup_sum, "total_campsites sum mismatch");
        errors += 1;
    }

    let checks: [(&str, &str); 4] = [
        (
            "rv + tent exceeds total",
            "SELECT COUNT(*) FROM facility_rollup \
             WHERE (rv_type_sites + tent_only_sites) > total_campsites",
        ),
        (
            "full hookup sites exceed a component count",
            "SELECT COUNT(*) FROM facility_rollup \
             WHERE full_hookup_sites > water_hookup_sites \
                OR full_hookup_sites > sewer_hookup_sites \
                OR full_hookup_sites > electric_hookup_sites",
        ),
        (
            "pull-through + back-in exceeds total",
            "SELECT COUNT(*) FROM facility_rollup \
             WHERE (pullthrough_sites + backin_sites) > total_campsites",
        ),
        (
            "hookup count exceeds total campsites",
            "SELECT COUNT(*) FROM facility_rollup \
             WHERE water_hookup_sites > total_campsites \
                OR sewer_hookup_sites > total_campsites \
                OR electric_hookup_sites > total_campsites \
                OR full_hookup_sites > total_campsites",
        ),
    ];
    for (what, sql) in checks {
        let bad = db.scalar(sql).await?;
        if bad > 0 {
            warn!(rows = bad, "{what}");
            errors += 1;
        }
    }

    let bad_len = db
        .scalar(
            "SELECT COUNT(*) FROM (\
                SELECT nc.facility_id, MAX(nc.max_vehicle_length) AS site_max \
                FROM norm_campsite nc \
                WHERE nc.max_vehicle_length IS NOT NULL \
                GROUP BY nc.facility_id\
             ) sub \
             JOIN facility_rollup fr ON sub.facility_id = fr.facility_id \
             WHERE fr.max_rv_length < sub.site_max",
        )
        .await?;
    if bad_len > 0 {
        warn!(rows = bad_len, "max_rv_length below a per-site observation");
        errors += 1;
    }

    if errors > 0 {
        warn!(errors, "rollup validation reported errors");
    }
    Ok(errors)
}
