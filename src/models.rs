//! Row types and enumerations shared across pipeline stages.
//!
//! The string spellings produced by the `as_str` methods are part of the
//! downstream query-layer contract and must stay stable across versions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

// ===== Campsite-level enumerations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivewayEntry {
    PullThrough,
    BackIn,
    Parallel,
}

impl DrivewayEntry {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrivewayEntry::PullThrough => "PULL_THROUGH",
            DrivewayEntry::BackIn => "BACK_IN",
            DrivewayEntry::Parallel => "PARALLEL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivewaySurface {
    Paved,
    Gravel,
    Grass,
}

impl DrivewaySurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrivewaySurface::Paved => "PAVED",
            DrivewaySurface::Gravel => "GRAVEL",
            DrivewaySurface::Grass => "GRASS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivewayGrade {
    Slight,
    Moderate,
    Severe,
}

impl DrivewayGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrivewayGrade::Slight => "SLIGHT",
            DrivewayGrade::Moderate => "MODERATE",
            DrivewayGrade::Severe => "SEVERE",
        }
    }
}

/// Site access mode, ordered here from most to least permissive. Multi-value
/// raw input resolves to the most permissive mode present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SiteAccess {
    DriveIn,
    WalkIn,
    Bike,
    HikeIn,
    BoatIn,
}

impl SiteAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteAccess::DriveIn => "DRIVE_IN",
            SiteAccess::WalkIn => "WALK_IN",
            SiteAccess::Bike => "BIKE",
            SiteAccess::HikeIn => "HIKE_IN",
            SiteAccess::BoatIn => "BOAT_IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityRating {
    Single,
    Double,
    Triple,
    Quad,
    Group,
}

impl CapacityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityRating::Single => "SINGLE",
            CapacityRating::Double => "DOUBLE",
            CapacityRating::Triple => "TRIPLE",
            CapacityRating::Quad => "QUAD",
            CapacityRating::Group => "GROUP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Full,
    Yes,
    No,
    Partial,
}

impl Shade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shade::Full => "FULL",
            Shade::Yes => "YES",
            Shade::No => "NO",
            Shade::Partial => "PARTIAL",
        }
    }
}

// ===== Facility-level enumerations =====

/// Camping-style classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampingType {
    Developed,
    Primitive,
    Dispersed,
    DayUse,
    NonCamping,
}

impl CampingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampingType::Developed => "DEVELOPED",
            CampingType::Primitive => "PRIMITIVE",
            CampingType::Dispersed => "DISPERSED",
            CampingType::DayUse => "DAY_USE",
            CampingType::NonCamping => "NON_CAMPING",
        }
    }
}

impl std::fmt::Display for CampingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DEVELOPED" => Ok(CampingType::Developed),
            "PRIMITIVE" => Ok(CampingType::Primitive),
            "DISPERSED" => Ok(CampingType::Dispersed),
            "DAY_USE" => Ok(CampingType::DayUse),
            "NON_CAMPING" => Ok(CampingType::NonCamping),
            _ => Err(Error::Other(format!("Unknown camping type: {}", s))),
        }
    }
}

/// Reliability grade attached to an inferred classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facility-level predominant driveway surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePredominant {
    Paved,
    Gravel,
    Mixed,
}

impl SurfacePredominant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfacePredominant::Paved => "PAVED",
            SurfacePredominant::Gravel => "GRAVEL",
            SurfacePredominant::Mixed => "MIXED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadAccess {
    FourWdRequired,
    HighClearance,
    Dirt,
    Gravel,
    Paved,
    Unknown,
}

impl RoadAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadAccess::FourWdRequired => "4WD_REQUIRED",
            RoadAccess::HighClearance => "HIGH_CLEARANCE",
            RoadAccess::Dirt => "DIRT",
            RoadAccess::Gravel => "GRAVEL",
            RoadAccess::Paved => "PAVED",
            RoadAccess::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalStatus {
    OpenYearRound,
    SeasonalClosure,
    WinterClosure,
    Unknown,
}

impl SeasonalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalStatus::OpenYearRound => "OPEN_YEAR_ROUND",
            SeasonalStatus::SeasonalClosure => "SEASONAL_CLOSURE",
            SeasonalStatus::WinterClosure => "WINTER_CLOSURE",
            SeasonalStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireStatus {
    CampfiresAllowed,
    Restrictions,
    NoCampfires,
    Unknown,
}

impl FireStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FireStatus::CampfiresAllowed => "CAMPFIRES_ALLOWED",
            FireStatus::Restrictions => "RESTRICTIONS",
            FireStatus::NoCampfires => "NO_CAMPFIRES",
            FireStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoondockAccess {
    Easy,
    Moderate,
    Rough,
    Unknown,
}

impl BoondockAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoondockAccess::Easy => "EASY",
            BoondockAccess::Moderate => "MODERATE",
            BoondockAccess::Rough => "ROUGH",
            BoondockAccess::Unknown => "UNKNOWN",
        }
    }
}

/// Tag display category. Evaluation order matches this grouping order, so
/// tags render grouped with warnings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Warning,
    Seasonal,
    Fire,
    Environment,
    RigSize,
    Hookup,
    Access,
    Style,
}

impl TagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Warning => "WARNING",
            TagCategory::Seasonal => "SEASONAL",
            TagCategory::Fire => "FIRE",
            TagCategory::Environment => "ENVIRONMENT",
            TagCategory::RigSize => "RIG_SIZE",
            TagCategory::Hookup => "HOOKUP",
            TagCategory::Access => "ACCESS",
            TagCategory::Style => "STYLE",
        }
    }
}

// ===== Raw input rows =====

/// A raw campsite row as populated by the collector
#[derive(Debug, Clone, FromRow)]
pub struct RawCampsite {
    pub campsite_id: String,
    pub facility_id: String,
    pub campsite_type: Option<String>,
    pub type_of_use: Option<String>,
    pub campsite_accessible: Option<bool>,
    pub campsite_reservable: Option<bool>,
}

/// A raw EAV attribute row
#[derive(Debug, Clone, FromRow)]
pub struct RawAttribute {
    pub campsite_id: String,
    pub attribute_name: String,
    pub attribute_value: Option<String>,
}

/// A raw equipment row; `max_length` uses 0 as a "not specified" sentinel
#[derive(Debug, Clone, FromRow)]
pub struct RawEquipment {
    pub campsite_id: String,
    pub equipment_name: String,
    pub max_length: Option<f64>,
}

/// A raw facility row joined with its managing organization
#[derive(Debug, Clone, FromRow)]
pub struct RawFacility {
    pub facility_id: String,
    pub facility_name: Option<String>,
    pub facility_type: Option<String>,
    pub org_abbrev: Option<String>,
    pub org_name: Option<String>,
    pub parent_rec_area_id: Option<String>,
    pub reservable: Option<bool>,
    pub facility_latitude: Option<f64>,
    pub facility_longitude: Option<f64>,
    pub facility_description: Option<String>,
}

/// A raw facility activity row
#[derive(Debug, Clone, FromRow)]
pub struct FacilityActivity {
    pub facility_id: String,
    pub activity_name: String,
}

// ===== Stage 1 output rows =====

/// One normalized row per campsite
#[derive(Debug, Clone, Default, FromRow)]
pub struct NormCampsite {
    pub campsite_id: String,
    pub facility_id: String,
    pub campsite_type: Option<String>,
    pub type_of_use: Option<String>,
    pub campsite_accessible: Option<bool>,
    pub campsite_reservable: Option<bool>,

    pub driveway_entry: Option<String>,
    pub driveway_surface: Option<String>,
    pub driveway_length_ft: Option<i64>,
    pub driveway_grade: Option<String>,

    // Hookups are tri-state: Some(true)/Some(false)/None (not reported)
    pub has_water_hookup: Option<bool>,
    pub has_sewer_hookup: Option<bool>,
    pub has_electric_hookup: Option<bool>,
    pub electric_amps: Option<String>,
    pub max_electric_amps: Option<i64>,
    pub has_full_hookup: bool,

    pub max_vehicle_length: Option<i64>,
    pub max_vehicle_length_raw: Option<String>,

    pub site_access: Option<String>,
    pub overhead_clearance_ft: Option<i64>,

    pub max_num_people: Option<i64>,
    pub max_num_vehicles: Option<i64>,
    pub capacity_rating: Option<String>,

    pub pets_allowed: Option<bool>,
    pub campfire_allowed: Option<bool>,
    pub shade: Option<String>,
}

/// One row per (campsite, equipment category)
#[derive(Debug, Clone, FromRow)]
pub struct NormEquipment {
    pub campsite_id: String,
    pub equipment_category: String,
    pub equipment_name_raw: String,
    pub max_length_ft: Option<i64>,
}

/// Per-facility description signals mined from HTML prose
#[derive(Debug, Clone, Default, FromRow)]
pub struct NormFacility {
    pub facility_id: String,

    pub coords_valid: bool,
    pub facility_latitude_clean: Option<f64>,
    pub facility_longitude_clean: Option<f64>,

    pub desc_mentions_rv: bool,
    pub desc_mentions_hookups: bool,
    pub desc_mentions_full_hookup: bool,
    pub desc_mentions_electric: bool,
    pub desc_mentions_water_hookup: bool,
    pub desc_mentions_sewer: bool,
    pub desc_mentions_dump_station: bool,
    pub desc_mentions_pull_through: bool,
    pub desc_mentions_generator: bool,
    pub desc_rv_not_recommended: bool,
    pub desc_road_paved: bool,
    pub desc_road_gravel: bool,
    pub desc_road_dirt: bool,
    pub desc_road_high_clearance: bool,
    pub desc_road_4wd: bool,
    pub desc_mentions_dispersed: bool,
    pub desc_mentions_primitive: bool,
    pub desc_mentions_vault_toilet: bool,
    pub desc_mentions_potable_water: bool,
    pub desc_max_rv_length: Option<i64>,
    pub desc_plain_text: String,

    pub desc_seasonal_closure: bool,
    pub desc_winter_closure: bool,
    pub desc_mentions_snow: bool,
    pub desc_fire_restrictions: bool,
    pub desc_mentions_elevation: bool,
    pub desc_elevation_ft: Option<i64>,
    pub desc_remote_no_cell: bool,
    pub desc_flood_risk: bool,
}

// ===== Stage 2 output row =====

/// One aggregate row per facility
#[derive(Debug, Clone, Default, FromRow)]
pub struct FacilityRollup {
    pub facility_id: String,

    // Identity
    pub facility_name: Option<String>,
    pub facility_type: Option<String>,
    pub org_abbrev: Option<String>,
    pub org_name: Option<String>,
    pub parent_rec_area_id: Option<String>,
    pub reservable: Option<bool>,

    // Coordinates
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub coords_valid: bool,

    // Site counts
    pub total_campsites: i64,
    pub overnight_sites: i64,
    pub day_use_sites: i64,

    // Campsite type breakdown
    pub rv_type_sites: i64,
    pub tent_only_sites: i64,
    pub standard_sites: i64,
    pub group_sites: i64,
    pub cabin_sites: i64,
    pub equestrian_sites: i64,
    pub walk_hike_boat_sites: i64,
    pub management_sites: i64,

    // Equipment-derived
    pub sites_accepting_rv: i64,
    pub sites_accepting_tent: i64,

    // Hookups
    pub has_water_hookup: bool,
    pub has_sewer_hookup: bool,
    pub has_electric_hookup: bool,
    pub has_full_hookup: bool,
    pub water_hookup_sites: i64,
    pub sewer_hookup_sites: i64,
    pub electric_hookup_sites: i64,
    pub full_hookup_sites: i64,
    pub max_amps: Option<i64>,

    // Driveway
    pub has_pullthrough: bool,
    pub pullthrough_sites: i64,
    pub backin_sites: i64,
    pub parallel_sites: i64,
    pub paved_sites: i64,
    pub gravel_sites: i64,
    pub surface_predominant: Option<String>,

    // Vehicle length: resolved plus the three source values
    pub max_rv_length: Option<i64>,
    pub max_rv_length_equip: Option<i64>,
    pub max_rv_length_attr: Option<i64>,
    pub max_rv_length_desc: Option<i64>,

    // Access
    pub site_access_predominant: Option<String>,
    pub drive_in_sites: i64,
    pub walk_in_sites: i64,
    pub hike_in_sites: i64,
    pub boat_in_sites: i64,

    // Description signals carried from norm_facility
    pub desc_mentions_rv: bool,
    pub desc_mentions_hookups: bool,
    pub desc_mentions_full_hookup: bool,
    pub desc_mentions_electric: bool,
    pub desc_mentions_dump_station: bool,
    pub desc_mentions_pull_through: bool,
    pub desc_mentions_generator: bool,
    pub desc_rv_not_recommended: bool,
    pub desc_road_paved: bool,
    pub desc_road_gravel: bool,
    pub desc_road_dirt: bool,
    pub desc_road_high_clearance: bool,
    pub desc_road_4wd: bool,
    pub desc_mentions_dispersed: bool,
    pub desc_mentions_primitive: bool,
    pub desc_mentions_vault_toilet: bool,
    pub desc_mentions_potable_water: bool,

    // Condition signals carried from norm_facility
    pub desc_seasonal_closure: bool,
    pub desc_winter_closure: bool,
    pub desc_mentions_snow: bool,
    pub desc_fire_restrictions: bool,
    pub desc_mentions_elevation: bool,
    pub desc_elevation_ft: Option<i64>,
    pub desc_remote_no_cell: bool,
    pub desc_flood_risk: bool,

    // Campfire aggregation
    pub campfire_yes_sites: i64,
    pub campfire_no_sites: i64,

    // Activity signals
    pub has_camping_activity: bool,
    pub has_rv_activity: bool,
    pub has_dispersed_activity: bool,

    // Classification
    pub camping_type: String,
    pub camping_type_confidence: String,
}

// ===== Stage 3 output rows =====

/// Derived condition indicators per facility
#[derive(Debug, Clone, FromRow)]
pub struct FacilityConditions {
    pub facility_id: String,
    pub road_access: String,
    pub driveway_surface: String,
    pub seasonal_status: String,
    pub fire_status: String,
    pub elevation_ft: Option<i64>,
    pub boondock_accessibility: Option<String>,
    pub max_rv_length: Option<i64>,
}

/// A display tag attached to a facility
#[derive(Debug, Clone, FromRow)]
pub struct FacilityTag {
    pub facility_id: String,
    pub tag: String,
    pub tag_category: String,
    pub display_order: i64,
}
