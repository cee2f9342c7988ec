//! SQLite storage for the pipeline
//!
//! One [`Db`] handle wraps a sqlx pool configured the same way for the CLI
//! and the tests (WAL journal, relaxed synchronous). Raw input tables are
//! read-only here; each stage-output table is rewritten through a
//! `replace_*` method that deletes and bulk-inserts inside one transaction,
//! so readers never observe a partially built table.

mod schema;

pub use schema::{SCHEMA_SQL, SCHEMA_VERSION};

use crate::error::Result;
use crate::models::{
    FacilityActivity, FacilityConditions, FacilityRollup, FacilityTag, NormCampsite,
    NormEquipment, NormFacility, RawAttribute, RawCampsite, RawEquipment, RawFacility,
};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// Database handle
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (or create) the database file
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize the full schema (raw input + output tables)
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check whether the schema has been created
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='campsites'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    /// Row count for a fixed table name
    pub async fn table_count(&self, table: &'static str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Run a validation count query and return the single integer result
    pub async fn scalar(&self, sql: &str) -> Result<i64> {
        let (value,): (Option<i64>,) = sqlx::query_as(sql).fetch_one(&self.pool).await?;
        Ok(value.unwrap_or(0))
    }

    // ===== Raw input loaders (deterministic order) =====

    pub async fn load_raw_campsites(&self) -> Result<Vec<RawCampsite>> {
        let rows = sqlx::query_as::<_, RawCampsite>(
            "SELECT campsite_id, facility_id, campsite_type, type_of_use, \
             campsite_accessible, campsite_reservable \
             FROM campsites ORDER BY campsite_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_raw_attributes(&self) -> Result<Vec<RawAttribute>> {
        let rows = sqlx::query_as::<_, RawAttribute>(
            "SELECT campsite_id, attribute_name, attribute_value \
             FROM campsite_attributes ORDER BY campsite_id, attribute_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_raw_equipment(&self) -> Result<Vec<RawEquipment>> {
        let rows = sqlx::query_as::<_, RawEquipment>(
            "SELECT campsite_id, equipment_name, max_length \
             FROM campsite_equipment ORDER BY campsite_id, equipment_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_raw_facilities(&self) -> Result<Vec<RawFacility>> {
        let rows = sqlx::query_as::<_, RawFacility>(
            "SELECT f.facility_id, f.facility_name, f.facility_type, \
             o.org_abbrev, o.org_name, f.parent_rec_area_id, f.reservable, \
             f.facility_latitude, f.facility_longitude, f.facility_description \
             FROM facilities f \
             LEFT JOIN organizations o ON f.parent_org_id = o.org_id \
             ORDER BY f.facility_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_facility_activities(&self) -> Result<Vec<FacilityActivity>> {
        let rows = sqlx::query_as::<_, FacilityActivity>(
            "SELECT facility_id, activity_name \
             FROM facility_activities ORDER BY facility_id, activity_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ===== Stage output loaders =====

    pub async fn load_norm_campsites(&self) -> Result<Vec<NormCampsite>> {
        let rows = sqlx::query_as::<_, NormCampsite>(
            "SELECT * FROM norm_campsite ORDER BY campsite_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_norm_equipment(&self) -> Result<Vec<NormEquipment>> {
        let rows = sqlx::query_as::<_, NormEquipment>(
            "SELECT * FROM norm_campsite_equipment ORDER BY campsite_id, equipment_category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_norm_facilities(&self) -> Result<Vec<NormFacility>> {
        let rows = sqlx::query_as::<_, NormFacility>(
            "SELECT * FROM norm_facility ORDER BY facility_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_rollups(&self) -> Result<Vec<FacilityRollup>> {
        let rows = sqlx::query_as::<_, FacilityRollup>(
            "SELECT * FROM facility_rollup ORDER BY facility_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_conditions(&self) -> Result<Vec<FacilityConditions>> {
        let rows = sqlx::query_as::<_, FacilityConditions>(
            "SELECT * FROM facility_conditions ORDER BY facility_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn load_tags(&self) -> Result<Vec<FacilityTag>> {
        let rows = sqlx::query_as::<_, FacilityTag>(
            "SELECT * FROM facility_tags ORDER BY facility_id, display_order",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ===== Transactional table swaps =====

    /// Rewrite `norm_campsite` as one transaction
    pub async fn replace_norm_campsites(&self, rows: &[NormCampsite]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM norm_campsite")
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO norm_campsite (\
                 campsite_id, facility_id, campsite_type, type_of_use, \
                 campsite_accessible, campsite_reservable, \
                 driveway_entry, driveway_surface, driveway_length_ft, driveway_grade, \
                 has_water_hookup, has_sewer_hookup, has_electric_hookup, \
                 electric_amps, max_electric_amps, has_full_hookup, \
                 max_vehicle_length, max_vehicle_length_raw, \
                 site_access, overhead_clearance_ft, \
                 max_num_people, max_num_vehicles, capacity_rating, \
                 pets_allowed, campfire_allowed, shade) \
                 VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
            )
            .bind(&r.campsite_id)
            .bind(&r.facility_id)
            .bind(&r.campsite_type)
            .bind(&r.type_of_use)
            .bind(r.campsite_accessible)
            .bind(r.campsite_reservable)
            .bind(&r.driveway_entry)
            .bind(&r.driveway_surface)
            .bind(r.driveway_length_ft)
            .bind(&r.driveway_grade)
            .bind(r.has_water_hookup)
            .bind(r.has_sewer_hookup)
            .bind(r.has_electric_hookup)
            .bind(&r.electric_amps)
            .bind(r.max_electric_amps)
            .bind(r.has_full_hookup)
            .bind(r.max_vehicle_length)
            .bind(&r.max_vehicle_length_raw)
            .bind(&r.site_access)
            .bind(r.overhead_clearance_ft)
            .bind(r.max_num_people)
            .bind(r.max_num_vehicles)
            .bind(&r.capacity_rating)
            .bind(r.pets_allowed)
            .bind(r.campfire_allowed)
            .bind(&r.shade)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Rewrite `norm_campsite_equipment` as one transaction
    pub async fn replace_norm_equipment(&self, rows: &[NormEquipment]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM norm_campsite_equipment")
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO norm_campsite_equipment \
                 (campsite_id, equipment_category, equipment_name_raw, max_length_ft) \
                 VALUES (?,?,?,?)",
            )
            .bind(&r.campsite_id)
            .bind(&r.equipment_category)
            .bind(&r.equipment_name_raw)
            .bind(r.max_length_ft)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Rewrite `norm_facility` as one transaction
    pub async fn replace_norm_facilities(&self, rows: &[NormFacility]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM norm_facility")
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO norm_facility (\
                 facility_id, coords_valid, facility_latitude_clean, facility_longitude_clean, \
                 desc_mentions_rv, desc_mentions_hookups, desc_mentions_full_hookup, \
                 desc_mentions_electric, desc_mentions_water_hookup, desc_mentions_sewer, \
                 desc_mentions_dump_station, desc_mentions_pull_through, desc_mentions_generator, \
                 desc_rv_not_recommended, desc_road_paved, desc_road_gravel, desc_road_dirt, \
                 desc_road_high_clearance, desc_road_4wd, desc_mentions_dispersed, \
                 desc_mentions_primitive, desc_mentions_vault_toilet, desc_mentions_potable_water, \
                 desc_max_rv_length, desc_plain_text, \
                 desc_seasonal_closure, desc_winter_closure, desc_mentions_snow, \
                 desc_fire_restrictions, desc_mentions_elevation, desc_elevation_ft, \
                 desc_remote_no_cell, desc_flood_risk) \
                 VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
            )
            .bind(&r.facility_id)
            .bind(r.coords_valid)
            .bind(r.facility_latitude_clean)
            .bind(r.facility_longitude_clean)
            .bind(r.desc_mentions_rv)
            .bind(r.desc_mentions_hookups)
            .bind(r.desc_mentions_full_hookup)
            .bind(r.desc_mentions_electric)
            .bind(r.desc_mentions_water_hookup)
            .bind(r.desc_mentions_sewer)
            .bind(r.desc_mentions_dump_station)
            .bind(r.desc_mentions_pull_through)
            .bind(r.desc_mentions_generator)
            .bind(r.desc_rv_not_recommended)
            .bind(r.desc_road_paved)
            .bind(r.desc_road_gravel)
            .bind(r.desc_road_dirt)
            .bind(r.desc_road_high_clearance)
            .bind(r.desc_road_4wd)
            .bind(r.desc_mentions_dispersed)
            .bind(r.desc_mentions_primitive)
            .bind(r.desc_mentions_vault_toilet)
            .bind(r.desc_mentions_potable_water)
            .bind(r.desc_max_rv_length)
            .bind(&r.desc_plain_text)
            .bind(r.desc_seasonal_closure)
            .bind(r.desc_winter_closure)
            .bind(r.desc_mentions_snow)
            .bind(r.desc_fire_restrictions)
            .bind(r.desc_mentions_elevation)
            .bind(r.desc_elevation_ft)
            .bind(r.desc_remote_no_cell)
            .bind(r.desc_flood_risk)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Rewrite `facility_rollup` as one transaction
    pub async fn replace_rollups(&self, rows: &[FacilityRollup]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM facility_rollup")
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO facility_rollup (\
                 facility_id, facility_name, facility_type, org_abbrev, org_name, \
                 parent_rec_area_id, reservable, \
                 latitude, longitude, coords_valid, \
                 total_campsites, overnight_sites, day_use_sites, \
                 rv_type_sites, tent_only_sites, standard_sites, group_sites, cabin_sites, \
                 equestrian_sites, walk_hike_boat_sites, management_sites, \
                 sites_accepting_rv, sites_accepting_tent, \
                 has_water_hookup, has_sewer_hookup, has_electric_hookup, has_full_hookup, \
                 water_hookup_sites, sewer_hookup_sites, electric_hookup_sites, \
                 full_hookup_sites, max_amps, \
                 has_pullthrough, pullthrough_sites, backin_sites, parallel_sites, \
                 paved_sites, gravel_sites, surface_predominant, \
                 max_rv_length, max_rv_length_equip, max_rv_length_attr, max_rv_length_desc, \
                 site_access_predominant, drive_in_sites, walk_in_sites, hike_in_sites, \
                 boat_in_sites, \
                 desc_mentions_rv, desc_mentions_hookups, desc_mentions_full_hookup, \
                 desc_mentions_electric, desc_mentions_dump_station, desc_mentions_pull_through, \
                 desc_mentions_generator, desc_rv_not_recommended, \
                 desc_road_paved, desc_road_gravel, desc_road_dirt, \
                 desc_road_high_clearance, desc_road_4wd, \
                 desc_mentions_dispersed, desc_mentions_primitive, \
                 desc_mentions_vault_toilet, desc_mentions_potable_water, \
                 desc_seasonal_closure, desc_winter_closure, desc_mentions_snow, \
                 desc_fire_restrictions, desc_mentions_elevation, desc_elevation_ft, \
                 desc_remote_no_cell, desc_flood_risk, \
                 campfire_yes_sites, campfire_no_sites, \
                 has_camping_activity, has_rv_activity, has_dispersed_activity, \
                 camping_type, camping_type_confidence) \
                 VALUES (?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?,\
                         ?,?,?,?,?,?,?,?,?,?)",
            )
            .bind(&r.facility_id)
            .bind(&r.facility_name)
            .bind(&r.facility_type)
            .bind(&r.org_abbrev)
            .bind(&r.org_name)
            .bind(&r.parent_rec_area_id)
            .bind(r.reservable)
            .bind(r.latitude)
            .bind(r.longitude)
            .bind(r.coords_valid)
            .bind(r.total_campsites)
            .bind(r.overnight_sites)
            .bind(r.day_use_sites)
            .bind(r.rv_type_sites)
            .bind(r.tent_only_sites)
            .bind(r.standard_sites)
            .bind(r.group_sites)
            .bind(r.cabin_sites)
            .bind(r.equestrian_sites)
            .bind(r.walk_hike_boat_sites)
            .bind(r.management_sites)
            .bind(r.sites_accepting_rv)
            .bind(r.sites_accepting_tent)
            .bind(r.has_water_hookup)
            .bind(r.has_sewer_hookup)
            .bind(r.has_electric_hookup)
            .bind(r.has_full_hookup)
            .bind(r.water_hookup_sites)
            .bind(r.sewer_hookup_sites)
            .bind(r.electric_hookup_sites)
            .bind(r.full_hookup_sites)
            .bind(r.max_amps)
            .bind(r.has_pullthrough)
            .bind(r.pullthrough_sites)
            .bind(r.backin_sites)
            .bind(r.parallel_sites)
            .bind(r.paved_sites)
            .bind(r.gravel_sites)
            .bind(&r.surface_predominant)
            .bind(r.max_rv_length)
            .bind(r.max_rv_length_equip)
            .bind(r.max_rv_length_attr)
            .bind(r.max_rv_length_desc)
            .bind(&r.site_access_predominant)
            .bind(r.drive_in_sites)
            .bind(r.walk_in_sites)
            .bind(r.hike_in_sites)
            .bind(r.boat_in_sites)
            .bind(r.desc_mentions_rv)
            .bind(r.desc_mentions_hookups)
            .bind(r.desc_mentions_full_hookup)
            .bind(r.desc_mentions_electric)
            .bind(r.desc_mentions_dump_station)
            .bind(r.desc_mentions_pull_through)
            .bind(r.desc_mentions_generator)
            .bind(r.desc_rv_not_recommended)
            .bind(r.desc_road_paved)
            .bind(r.desc_road_gravel)
            .bind(r.desc_road_dirt)
            .bind(r.desc_road_high_clearance)
            .bind(r.desc_road_4wd)
            .bind(r.desc_mentions_dispersed)
            .bind(r.desc_mentions_primitive)
            .bind(r.desc_mentions_vault_toilet)
            .bind(r.desc_mentions_potable_water)
            .bind(r.desc_seasonal_closure)
            .bind(r.desc_winter_closure)
            .bind(r.desc_mentions_snow)
            .bind(r.desc_fire_restrictions)
            .bind(r.desc_mentions_elevation)
            .bind(r.desc_elevation_ft)
            .bind(r.desc_remote_no_cell)
            .bind(r.desc_flood_risk)
            .bind(r.campfire_yes_sites)
            .bind(r.campfire_no_sites)
            .bind(r.has_camping_activity)
            .bind(r.has_rv_activity)
            .bind(r.has_dispersed_activity)
            .bind(&r.camping_type)
            .bind(&r.camping_type_confidence)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Rewrite `facility_conditions` and `facility_tags` together as one
    /// transaction; stage 3 owns both tables
    pub async fn replace_conditions_and_tags(
        &self,
        conditions: &[FacilityConditions],
        tags: &[FacilityTag],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM facility_conditions")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM facility_tags")
            .execute(&mut *tx)
            .await?;
        for c in conditions {
            sqlx::query(
                "INSERT INTO facility_conditions (\
                 facility_id, road_access, driveway_surface, seasonal_status, \
                 fire_status, elevation_ft, boondock_accessibility, max_rv_length) \
                 VALUES (?,?,?,?,?,?,?,?)",
            )
            .bind(&c.facility_id)
            .bind(&c.road_access)
            .bind(&c.driveway_surface)
            .bind(&c.seasonal_status)
            .bind(&c.fire_status)
            .bind(c.elevation_ft)
            .bind(&c.boondock_accessibility)
            .bind(c.max_rv_length)
            .execute(&mut *tx)
            .await?;
        }
        for t in tags {
            sqlx::query(
                "INSERT INTO facility_tags (facility_id, tag, tag_category, display_order) \
                 VALUES (?,?,?,?)",
            )
            .bind(&t.facility_id)
            .bind(&t.tag)
            .bind(&t.tag_category)
            .bind(t.display_order)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    // ===== Run metadata =====

    /// Upsert a batch of metadata entries with a shared timestamp
    pub async fn set_meta(&self, entries: &[(&str, String)]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO pipeline_meta (key, value, updated_at) VALUES (?,?,?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                 updated_at = excluded.updated_at",
            )
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Read a single metadata value
    pub async fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT value FROM pipeline_meta WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.and_then(|(v,)| v))
    }

    /// All metadata entries, ordered by key
    pub async fn list_meta(&self) -> Result<Vec<(String, Option<String>, Option<String>)>> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
            "SELECT key, value, updated_at FROM pipeline_meta ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> (tempfile::TempDir, Db) {
        let dir = tempfile::tempdir().unwrap();
        let db = Db::connect(&dir.path().join("test.db")).await.unwrap();
        db.init_schema().await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_init_and_counts() {
        let (_dir, db) = test_db().await;
        assert!(db.is_initialized().await.unwrap());
        assert_eq!(db.table_count("campsites").await.unwrap(), 0);
        assert_eq!(db.table_count("facility_rollup").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_meta_roundtrip() {
        let (_dir, db) = test_db().await;
        db.set_meta(&[("schema_version", "1".to_string())])
            .await
            .unwrap();
        assert_eq!(
            db.get_meta("schema_version").await.unwrap(),
            Some("1".to_string())
        );
        db.set_meta(&[("schema_version", "2".to_string())])
            .await
            .unwrap();
        assert_eq!(
            db.get_meta("schema_version").await.unwrap(),
            Some("2".to_string())
        );
        assert_eq!(db.list_meta().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_equipment_swap_is_full_rewrite() {
        let (_dir, db) = test_db().await;
        let first = vec![NormEquipment {
            campsite_id: "c1".into(),
            equipment_category: "RV".into(),
            equipment_name_raw: "RV".into(),
            max_length_ft: Some(40),
        }];
        db.replace_norm_equipment(&first).await.unwrap();

        let second = vec![NormEquipment {
            campsite_id: "c2".into(),
            equipment_category: "TENT".into(),
            equipment_name_raw: "Tent".into(),
            max_length_ft: None,
        }];
        db.replace_norm_equipment(&second).await.unwrap();

        let rows = db.load_norm_equipment().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].campsite_id, "c2");
    }
}
