//! Access to the DJI GO 4 waypoint database.
//!
//! We never create anything here, the database must come from DJI GO 4 itself (it lives in
//! `DJI/dji.go.v4/DJI_waypoints/way_point_2.db` on the device).  All we do is read the existing
//! mission identifiers and append one mission with its waypoints.
//!

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, trace};

use qgc2dji_formats::{MissionRecord, Tables, WaypointRecord};

use crate::Status;

/// Handle on an existing DJI GO 4 database.
///
#[derive(Debug)]
pub struct MissionStore {
    /// Database file
    path: PathBuf,
    /// Table names
    tables: Tables,
    conn: Connection,
}

/// `INSERT INTO "table" (a, b, …) VALUES (?, ?, …)`
///
fn insert_sql(table: &str, columns: &[&str]) -> String {
    let marks = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        marks
    )
}

impl MissionStore {
    /// Open an existing database, read-write.
    ///
    #[tracing::instrument]
    pub fn open(path: &Path, tables: Tables) -> Result<MissionStore, Status> {
        if !path.is_file() {
            return Err(Status::InputNotFound(path.display().to_string()));
        }

        info!("Opening {:?}", path);
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| Status::StoreUnavailable(path.display().to_string(), e.to_string()))?;

        Ok(MissionStore {
            path: path.to_path_buf(),
            tables,
            conn,
        })
    }

    /// Database file
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, e: rusqlite::Error) -> Status {
        Status::StoreUnavailable(self.path.display().to_string(), e.to_string())
    }

    /// All mission identifiers already in use.
    ///
    /// This is also the first real access to the file so anything wrong with it shows up here.
    ///
    #[tracing::instrument(skip(self))]
    pub fn mission_ids(&self) -> Result<HashSet<i64>, Status> {
        let sql = format!("SELECT missionId FROM \"{}\"", self.tables.mission);
        trace!("{}", sql);

        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.unavailable(e))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .map_err(|e| self.unavailable(e))?
            .collect::<Result<HashSet<_>, _>>()
            .map_err(|e| self.unavailable(e))?;
        debug!("{} existing missions", ids.len());
        Ok(ids)
    }

    /// Copy the database file into `<file>.bak`, overwriting any previous backup.
    ///
    #[tracing::instrument(skip(self))]
    pub fn backup(&self) -> Result<PathBuf> {
        let mut bak = self.path.clone().into_os_string();
        bak.push(".bak");
        let bak = PathBuf::from(bak);

        let size = fs::copy(&self.path, &bak)?;
        info!("Backup of {:?} in {:?} ({} bytes)", self.path, bak, size);
        Ok(bak)
    }

    /// Write the mission and all its waypoints, everything or nothing.
    ///
    #[tracing::instrument(skip(self, mission, waypoints))]
    pub fn insert(&mut self, mission: &MissionRecord, waypoints: &[WaypointRecord]) -> Result<()> {
        let mission_sql = insert_sql(&self.tables.mission, &MissionRecord::COLUMNS);
        let waypoint_sql = insert_sql(&self.tables.waypoint, &WaypointRecord::COLUMNS);
        trace!("{}", mission_sql);
        trace!("{}", waypoint_sql);

        let tx = self.conn.transaction()?;

        // Same order as `MissionRecord::COLUMNS`
        //
        tx.execute(
            &mission_sql,
            params![
                mission.mission_id,
                mission.is_use_custom_direction,
                mission.update_time,
                mission.finished_action,
                mission.first_lng,
                mission.local,
                mission.exit_mission_on_rc_signal_lost,
                mission.flight_path_mode,
                mission.is_cache,
                mission.rotate_gimbal_pitch,
                mission.goto_first_waypoint_mode,
                mission.point_count,
                mission.repeat_times,
                mission.rout_distance,
                mission.first_lat,
                mission.mission_name,
                mission.max_flight_speed,
                mission.heading_mode,
                mission.auto_flight_speed,
                mission.is_enable_multi_poi,
            ],
        )?;

        // Same order as `WaypointRecord::COLUMNS`
        //
        {
            let mut stmt = tx.prepare(&waypoint_sql)?;
            for wp in waypoints {
                stmt.execute(params![
                    wp.heading_type,
                    wp.altitude,
                    wp.mission_id,
                    wp.poi_index,
                    wp.heading,
                    wp.latitude,
                    wp.action,
                    wp.pitch,
                    wp.radius,
                    wp.speed,
                    wp.longitude,
                    wp.my_index,
                ])?;
            }
        }

        tx.commit()?;
        info!(
            "Mission {} written with {} waypoints",
            mission.mission_id,
            waypoints.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    const SCHEMA: &str = include_str!("../testdata/dji_schema.sql");

    fn setup() -> Result<(TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("way_point_2.db");
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        Ok((dir, path))
    }

    fn mission(id: i64, count: i64) -> MissionRecord {
        MissionRecord {
            mission_id: id,
            is_use_custom_direction: 0,
            update_time: 1_709_647_629_000,
            finished_action: 4,
            first_lng: 0.,
            local: String::new(),
            exit_mission_on_rc_signal_lost: 0,
            flight_path_mode: 0,
            is_cache: 0,
            rotate_gimbal_pitch: 1,
            goto_first_waypoint_mode: 0,
            point_count: count,
            repeat_times: 1,
            rout_distance: 127.81163334302978,
            first_lat: 0.,
            mission_name: "test".to_string(),
            max_flight_speed: 8.3,
            heading_mode: 0,
            auto_flight_speed: 3.5,
            is_enable_multi_poi: 0,
        }
    }

    fn waypoint(id: i64, n: i64) -> WaypointRecord {
        WaypointRecord {
            heading_type: 0,
            altitude: 60.,
            mission_id: id,
            poi_index: -1,
            heading: 0,
            latitude: -19.99 - n as f64 * 1e-4,
            action: 0,
            pitch: -90.,
            radius: 2.,
            speed: 0.,
            longitude: 57.60,
            my_index: n,
        }
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            "INSERT INTO \"foo\" (a, b, c) VALUES (?, ?, ?)",
            insert_sql("foo", &["a", "b", "c"])
        );
    }

    #[test]
    fn test_open_missing() {
        let res = MissionStore::open(Path::new("/nonexistent/way_point_2.db"), Tables::default());
        assert!(matches!(res, Err(Status::InputNotFound(_))));
    }

    #[test]
    fn test_mission_ids() -> Result<()> {
        let (_dir, path) = setup()?;

        let store = MissionStore::open(&path, Tables::default())?;
        let ids = store.mission_ids()?;
        assert_eq!(HashSet::from([54321]), ids);
        Ok(())
    }

    #[test]
    fn test_mission_ids_not_a_database() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("way_point_2.db");
        fs::write(&path, "this is not a database, not even close to one, really")?;

        let res = MissionStore::open(&path, Tables::default()).and_then(|s| s.mission_ids());
        assert!(matches!(res, Err(Status::StoreUnavailable(_, _))));
        Ok(())
    }

    #[test]
    fn test_mission_ids_no_table() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("way_point_2.db");
        Connection::open(&path)?.execute_batch("CREATE TABLE foo (bar INTEGER);")?;

        let store = MissionStore::open(&path, Tables::default())?;
        assert!(matches!(
            store.mission_ids(),
            Err(Status::StoreUnavailable(_, _))
        ));
        Ok(())
    }

    #[test]
    fn test_insert() -> Result<()> {
        let (_dir, path) = setup()?;

        let mut store = MissionStore::open(&path, Tables::default())?;
        let wps: Vec<_> = (0..5).map(|n| waypoint(12345, n)).collect();
        store.insert(&mission(12345, 5), &wps)?;

        assert_eq!(HashSet::from([54321, 12345]), store.mission_ids()?);

        let conn = Connection::open(&path)?;
        let (count, dist): (i64, f64) = conn.query_row(
            &format!(
                "SELECT pointCount, routDistance FROM \"{}\" WHERE missionId = 12345",
                Tables::default().mission
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(5, count);
        assert_eq!(127.81163334302978, dist);

        let mut stmt = conn.prepare(&format!(
            "SELECT myIndex, pitch, poiIndex FROM \"{}\" WHERE missionId = 12345 ORDER BY myIndex",
            Tables::default().waypoint
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(5, rows.len());
        for (n, (idx, pitch, poi)) in rows.into_iter().enumerate() {
            assert_eq!(n as i64, idx);
            assert_eq!(-90., pitch);
            assert_eq!(-1, poi);
        }
        Ok(())
    }

    #[test]
    fn test_insert_duplicate_is_rolled_back() -> Result<()> {
        let (_dir, path) = setup()?;

        let mut store = MissionStore::open(&path, Tables::default())?;
        let wps: Vec<_> = (0..3).map(|n| waypoint(54321, n)).collect();
        assert!(store.insert(&mission(54321, 3), &wps).is_err());

        let conn = Connection::open(&path)?;
        let count: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM \"{}\" WHERE missionId = 54321",
                Tables::default().waypoint
            ),
            [],
            |row| row.get(0),
        )?;
        assert_eq!(2, count);
        Ok(())
    }

    #[test]
    fn test_backup() -> Result<()> {
        let (dir, path) = setup()?;

        let store = MissionStore::open(&path, Tables::default())?;
        let bak = store.backup()?;
        assert_eq!(dir.path().join("way_point_2.db.bak"), bak);
        assert_eq!(fs::read(&path)?, fs::read(&bak)?);
        Ok(())
    }
}
