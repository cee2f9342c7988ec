//! SQLite schema definition
//!
//! Raw input tables are owned by the out-of-scope collector; they are created
//! here so a fresh deployment (and the test suite) has the full schema, but
//! the pipeline never mutates them. The three stage-output tables plus
//! `pipeline_meta` are rewritten by their owning stage on every run.

/// SQL schema for raw input and pipeline output tables
pub const SCHEMA_SQL: &str = r#"
-- ===== Raw input (collector-owned, read-only here) =====

CREATE TABLE IF NOT EXISTS facilities (
    facility_id          TEXT PRIMARY KEY,
    facility_name        TEXT,
    facility_type        TEXT,
    parent_org_id        TEXT,
    parent_rec_area_id   TEXT,
    facility_latitude    REAL,
    facility_longitude   REAL,
    facility_description TEXT,
    reservable           INTEGER
);

CREATE TABLE IF NOT EXISTS organizations (
    org_id      TEXT PRIMARY KEY,
    org_abbrev  TEXT,
    org_name    TEXT
);

CREATE TABLE IF NOT EXISTS campsites (
    campsite_id          TEXT PRIMARY KEY,
    facility_id          TEXT NOT NULL,
    campsite_type        TEXT,
    type_of_use          TEXT,
    campsite_accessible  INTEGER,
    campsite_reservable  INTEGER
);

-- Entity-attribute-value rows; attribute_value formatting is unconstrained
CREATE TABLE IF NOT EXISTS campsite_attributes (
    campsite_id     TEXT NOT NULL,
    attribute_name  TEXT NOT NULL,
    attribute_value TEXT
);

-- max_length uses 0 as a "not specified" sentinel
CREATE TABLE IF NOT EXISTS campsite_equipment (
    campsite_id     TEXT NOT NULL,
    equipment_name  TEXT NOT NULL,
    max_length      REAL
);

CREATE TABLE IF NOT EXISTS facility_activities (
    facility_id     TEXT NOT NULL,
    activity_name   TEXT NOT NULL
);

-- ===== Stage 1: normalized per-site rows =====

CREATE TABLE IF NOT EXISTS norm_campsite (
    campsite_id         TEXT PRIMARY KEY,
    facility_id         TEXT NOT NULL,

    campsite_type       TEXT,
    type_of_use         TEXT,
    campsite_accessible INTEGER,
    campsite_reservable INTEGER,

    -- Driveway
    driveway_entry      TEXT,       -- BACK_IN | PULL_THROUGH | PARALLEL | NULL
    driveway_surface    TEXT,       -- PAVED | GRAVEL | GRASS | NULL
    driveway_length_ft  INTEGER,
    driveway_grade      TEXT,       -- SLIGHT | MODERATE | SEVERE | NULL

    -- Hookups (1 / 0 / NULL = not reported)
    has_water_hookup    INTEGER,
    has_sewer_hookup    INTEGER,
    has_electric_hookup INTEGER,
    electric_amps       TEXT,       -- e.g. '50/30/20'
    max_electric_amps   INTEGER,
    has_full_hookup     INTEGER NOT NULL DEFAULT 0,

    -- Vehicle
    max_vehicle_length  INTEGER,
    max_vehicle_length_raw TEXT,    -- original string for audit

    -- Access
    site_access         TEXT,       -- DRIVE_IN | WALK_IN | BIKE | HIKE_IN | BOAT_IN | NULL

    -- Clearance
    overhead_clearance_ft INTEGER,

    -- Capacity
    max_num_people      INTEGER,
    max_num_vehicles    INTEGER,
    capacity_rating     TEXT,       -- SINGLE | DOUBLE | TRIPLE | QUAD | GROUP | NULL

    -- Amenities
    pets_allowed        INTEGER,
    campfire_allowed    INTEGER,
    shade               TEXT        -- FULL | YES | NO | PARTIAL | NULL
);

CREATE TABLE IF NOT EXISTS norm_campsite_equipment (
    campsite_id         TEXT NOT NULL,
    equipment_category  TEXT NOT NULL,
    equipment_name_raw  TEXT NOT NULL,
    max_length_ft       INTEGER,
    PRIMARY KEY (campsite_id, equipment_category)
);

CREATE TABLE IF NOT EXISTS norm_facility (
    facility_id                 TEXT PRIMARY KEY,

    -- Coordinate quality (0/0 raw coordinates are a "missing" sentinel)
    coords_valid                INTEGER NOT NULL,
    facility_latitude_clean     REAL,
    facility_longitude_clean    REAL,

    -- Description signals
    desc_mentions_rv            INTEGER NOT NULL DEFAULT 0,
    desc_mentions_hookups       INTEGER NOT NULL DEFAULT 0,
    desc_mentions_full_hookup   INTEGER NOT NULL DEFAULT 0,
    desc_mentions_electric      INTEGER NOT NULL DEFAULT 0,
    desc_mentions_water_hookup  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_sewer         INTEGER NOT NULL DEFAULT 0,
    desc_mentions_dump_station  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_pull_through  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_generator     INTEGER NOT NULL DEFAULT 0,
    desc_rv_not_recommended     INTEGER NOT NULL DEFAULT 0,
    desc_road_paved             INTEGER NOT NULL DEFAULT 0,
    desc_road_gravel            INTEGER NOT NULL DEFAULT 0,
    desc_road_dirt              INTEGER NOT NULL DEFAULT 0,
    desc_road_high_clearance    INTEGER NOT NULL DEFAULT 0,
    desc_road_4wd               INTEGER NOT NULL DEFAULT 0,
    desc_mentions_dispersed     INTEGER NOT NULL DEFAULT 0,
    desc_mentions_primitive     INTEGER NOT NULL DEFAULT 0,
    desc_mentions_vault_toilet  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_potable_water INTEGER NOT NULL DEFAULT 0,
    desc_max_rv_length          INTEGER,
    desc_plain_text             TEXT NOT NULL DEFAULT '',

    -- Condition signals
    desc_seasonal_closure       INTEGER NOT NULL DEFAULT 0,
    desc_winter_closure         INTEGER NOT NULL DEFAULT 0,
    desc_mentions_snow          INTEGER NOT NULL DEFAULT 0,
    desc_fire_restrictions      INTEGER NOT NULL DEFAULT 0,
    desc_mentions_elevation     INTEGER NOT NULL DEFAULT 0,
    desc_elevation_ft           INTEGER,
    desc_remote_no_cell         INTEGER NOT NULL DEFAULT 0,
    desc_flood_risk             INTEGER NOT NULL DEFAULT 0
);

-- ===== Stage 2: one aggregate row per facility =====

CREATE TABLE IF NOT EXISTS facility_rollup (
    facility_id             TEXT PRIMARY KEY,

    -- Identity
    facility_name           TEXT,
    facility_type           TEXT,
    org_abbrev              TEXT,
    org_name                TEXT,
    parent_rec_area_id      TEXT,
    reservable              INTEGER,

    -- Coordinates
    latitude                REAL,
    longitude               REAL,
    coords_valid            INTEGER NOT NULL DEFAULT 0,

    -- Site counts
    total_campsites         INTEGER NOT NULL DEFAULT 0,
    overnight_sites         INTEGER NOT NULL DEFAULT 0,
    day_use_sites           INTEGER NOT NULL DEFAULT 0,

    -- Campsite type breakdown
    rv_type_sites           INTEGER NOT NULL DEFAULT 0,
    tent_only_sites         INTEGER NOT NULL DEFAULT 0,
    standard_sites          INTEGER NOT NULL DEFAULT 0,
    group_sites             INTEGER NOT NULL DEFAULT 0,
    cabin_sites             INTEGER NOT NULL DEFAULT 0,
    equestrian_sites        INTEGER NOT NULL DEFAULT 0,
    walk_hike_boat_sites    INTEGER NOT NULL DEFAULT 0,
    management_sites        INTEGER NOT NULL DEFAULT 0,

    -- Equipment-derived
    sites_accepting_rv      INTEGER NOT NULL DEFAULT 0,
    sites_accepting_tent    INTEGER NOT NULL DEFAULT 0,

    -- Hookups
    has_water_hookup        INTEGER NOT NULL DEFAULT 0,
    has_sewer_hookup        INTEGER NOT NULL DEFAULT 0,
    has_electric_hookup     INTEGER NOT NULL DEFAULT 0,
    has_full_hookup         INTEGER NOT NULL DEFAULT 0,
    water_hookup_sites      INTEGER NOT NULL DEFAULT 0,
    sewer_hookup_sites      INTEGER NOT NULL DEFAULT 0,
    electric_hookup_sites   INTEGER NOT NULL DEFAULT 0,
    full_hookup_sites       INTEGER NOT NULL DEFAULT 0,
    max_amps                INTEGER,

    -- Driveway
    has_pullthrough         INTEGER NOT NULL DEFAULT 0,
    pullthrough_sites       INTEGER NOT NULL DEFAULT 0,
    backin_sites            INTEGER NOT NULL DEFAULT 0,
    parallel_sites          INTEGER NOT NULL DEFAULT 0,
    paved_sites             INTEGER NOT NULL DEFAULT 0,
    gravel_sites            INTEGER NOT NULL DEFAULT 0,
    surface_predominant     TEXT,   -- PAVED | GRAVEL | MIXED | NULL

    -- Vehicle length (three sources + resolved)
    max_rv_length           INTEGER,
    max_rv_length_equip     INTEGER,
    max_rv_length_attr      INTEGER,
    max_rv_length_desc      INTEGER,

    -- Access
    site_access_predominant TEXT,
    drive_in_sites          INTEGER NOT NULL DEFAULT 0,
    walk_in_sites           INTEGER NOT NULL DEFAULT 0,
    hike_in_sites           INTEGER NOT NULL DEFAULT 0,
    boat_in_sites           INTEGER NOT NULL DEFAULT 0,

    -- Description signals (from norm_facility)
    desc_mentions_rv            INTEGER NOT NULL DEFAULT 0,
    desc_mentions_hookups       INTEGER NOT NULL DEFAULT 0,
    desc_mentions_full_hookup   INTEGER NOT NULL DEFAULT 0,
    desc_mentions_electric      INTEGER NOT NULL DEFAULT 0,
    desc_mentions_dump_station  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_pull_through  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_generator     INTEGER NOT NULL DEFAULT 0,
    desc_rv_not_recommended     INTEGER NOT NULL DEFAULT 0,
    desc_road_paved             INTEGER NOT NULL DEFAULT 0,
    desc_road_gravel            INTEGER NOT NULL DEFAULT 0,
    desc_road_dirt              INTEGER NOT NULL DEFAULT 0,
    desc_road_high_clearance    INTEGER NOT NULL DEFAULT 0,
    desc_road_4wd               INTEGER NOT NULL DEFAULT 0,
    desc_mentions_dispersed     INTEGER NOT NULL DEFAULT 0,
    desc_mentions_primitive     INTEGER NOT NULL DEFAULT 0,
    desc_mentions_vault_toilet  INTEGER NOT NULL DEFAULT 0,
    desc_mentions_potable_water INTEGER NOT NULL DEFAULT 0,

    -- Condition signals (from norm_facility)
    desc_seasonal_closure       INTEGER NOT NULL DEFAULT 0,
    desc_winter_closure         INTEGER NOT NULL DEFAULT 0,
    desc_mentions_snow          INTEGER NOT NULL DEFAULT 0,
    desc_fire_restrictions      INTEGER NOT NULL DEFAULT 0,
    desc_mentions_elevation     INTEGER NOT NULL DEFAULT 0,
    desc_elevation_ft           INTEGER,
    desc_remote_no_cell         INTEGER NOT NULL DEFAULT 0,
    desc_flood_risk             INTEGER NOT NULL DEFAULT 0,

    -- Campfire aggregation
    campfire_yes_sites          INTEGER NOT NULL DEFAULT 0,
    campfire_no_sites           INTEGER NOT NULL DEFAULT 0,

    -- Activity signals
    has_camping_activity    INTEGER NOT NULL DEFAULT 0,
    has_rv_activity         INTEGER NOT NULL DEFAULT 0,
    has_dispersed_activity  INTEGER NOT NULL DEFAULT 0,

    -- Classification
    camping_type            TEXT NOT NULL,
    camping_type_confidence TEXT NOT NULL
);

-- ===== Stage 3: conditions and tags =====

CREATE TABLE IF NOT EXISTS facility_conditions (
    facility_id             TEXT PRIMARY KEY,
    road_access             TEXT NOT NULL,  -- PAVED / GRAVEL / DIRT / HIGH_CLEARANCE / 4WD_REQUIRED / UNKNOWN
    driveway_surface        TEXT NOT NULL,  -- PAVED / GRAVEL / MIXED / UNKNOWN
    seasonal_status         TEXT NOT NULL,  -- OPEN_YEAR_ROUND / SEASONAL_CLOSURE / WINTER_CLOSURE / UNKNOWN
    fire_status             TEXT NOT NULL,  -- CAMPFIRES_ALLOWED / RESTRICTIONS / NO_CAMPFIRES / UNKNOWN
    elevation_ft            INTEGER,
    boondock_accessibility  TEXT,           -- EASY / MODERATE / ROUGH / UNKNOWN; NULL unless dispersed/primitive
    max_rv_length           INTEGER
);

CREATE TABLE IF NOT EXISTS facility_tags (
    facility_id     TEXT NOT NULL,
    tag             TEXT NOT NULL,
    tag_category    TEXT NOT NULL,
    display_order   INTEGER NOT NULL,
    PRIMARY KEY (facility_id, tag)
);

-- ===== Run metadata (operational diagnostics only) =====

CREATE TABLE IF NOT EXISTS pipeline_meta (
    key         TEXT PRIMARY KEY,
    value       TEXT,
    updated_at  TEXT
);

-- ===== Indexes =====

CREATE INDEX IF NOT EXISTS idx_nc_facility ON norm_campsite(facility_id);
CREATE INDEX IF NOT EXISTS idx_nc_entry ON norm_campsite(driveway_entry);
CREATE INDEX IF NOT EXISTS idx_nc_electric ON norm_campsite(has_electric_hookup);
CREATE INDEX IF NOT EXISTS idx_nc_water ON norm_campsite(has_water_hookup);
CREATE INDEX IF NOT EXISTS idx_nc_sewer ON norm_campsite(has_sewer_hookup);
CREATE INDEX IF NOT EXISTS idx_nc_access ON norm_campsite(site_access);
CREATE INDEX IF NOT EXISTS idx_nc_vlen ON norm_campsite(max_vehicle_length);
CREATE INDEX IF NOT EXISTS idx_nc_full ON norm_campsite(has_full_hookup);
CREATE INDEX IF NOT EXISTS idx_ne_campsite ON norm_campsite_equipment(campsite_id);
CREATE INDEX IF NOT EXISTS idx_ne_category ON norm_campsite_equipment(equipment_category);
CREATE INDEX IF NOT EXISTS idx_nf_coords ON norm_facility(coords_valid);
CREATE INDEX IF NOT EXISTS idx_nf_rv_warn ON norm_facility(desc_rv_not_recommended);
CREATE INDEX IF NOT EXISTS idx_fr_type ON facility_rollup(camping_type);
CREATE INDEX IF NOT EXISTS idx_fr_rv_len ON facility_rollup(max_rv_length);
CREATE INDEX IF NOT EXISTS idx_fr_hookups ON facility_rollup(has_full_hookup, has_electric_hookup, max_amps);
CREATE INDEX IF NOT EXISTS idx_fr_org ON facility_rollup(org_abbrev);
CREATE INDEX IF NOT EXISTS idx_fr_coords ON facility_rollup(coords_valid, latitude, longitude);
CREATE INDEX IF NOT EXISTS idx_fr_pullthrough ON facility_rollup(has_pullthrough);
CREATE INDEX IF NOT EXISTS idx_fr_rv_filter ON facility_rollup(camping_type, max_rv_length, has_electric_hookup);
CREATE INDEX IF NOT EXISTS idx_fc_road ON facility_conditions(road_access);
CREATE INDEX IF NOT EXISTS idx_fc_season ON facility_conditions(seasonal_status);
CREATE INDEX IF NOT EXISTS idx_fc_fire ON facility_conditions(fire_status);
CREATE INDEX IF NOT EXISTS idx_fc_elev ON facility_conditions(elevation_ft);
CREATE INDEX IF NOT EXISTS idx_fc_boondock ON facility_conditions(boondock_accessibility);
CREATE INDEX IF NOT EXISTS idx_ft_tag ON facility_tags(tag);
CREATE INDEX IF NOT EXISTS idx_ft_cat ON facility_tags(tag_category);
CREATE INDEX IF NOT EXISTS idx_ft_fac ON facility_tags(facility_id);
"#;

/// Schema contract version recorded in `pipeline_meta`
pub const SCHEMA_VERSION: &str = "1";
