use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rusqlite::Connection;
use tempfile::TempDir;

const BIN: &str = "qgc2dji";

const SCHEMA: &str = include_str!("../testdata/dji_schema.sql");

const MISSIONS: &str = "dji_pilot_dji_groundstation_waypoint2_model_WayPoint2MissionDBModel";
const WAYPOINTS: &str =
    "dji_pilot_dji_groundstation_waypoint2_model_WayPoint2MissionDBModel$WayPoint2DBPoint";

/// Fresh database with one existing mission, `$HOME` points at the same place so no
/// configuration file is found.
///
fn setup() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("way_point_2.db");
    Connection::open(&db).unwrap().execute_batch(SCHEMA).unwrap();
    (dir, db)
}

fn qgc2dji(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");
    cmd
}

fn count(db: &Path, table: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn test_convert_yes() {
    let (dir, db) = setup();

    let out = qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey.plan")
        .arg("-n")
        .arg("quarry")
        .arg("-y")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("MISSION DATA"));
    assert!(stdout.contains("quarry"));

    assert_eq!(2, count(&db, MISSIONS));
    assert_eq!(2 + 16, count(&db, WAYPOINTS));
    assert!(dir.path().join("way_point_2.db.bak").exists());

    let conn = Connection::open(&db).unwrap();
    let (id, points, speed, action): (i64, i64, f64, i64) = conn
        .query_row(
            &format!(
                "SELECT missionId, pointCount, autoFlightSpeed, finishedAction FROM \"{}\" WHERE missionName = 'quarry'",
                MISSIONS
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert!((10_000..=99_999).contains(&id));
    assert_ne!(54321, id);
    assert_eq!(16, points);
    assert_eq!(5.5, speed);
    assert_eq!(4, action);

    let altitude: f64 = conn
        .query_row(
            &format!(
                "SELECT DISTINCT altitude FROM \"{}\" WHERE missionId = ?1",
                WAYPOINTS
            ),
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(60., altitude);
}

#[test]
fn test_convert_overrides() {
    let (dir, db) = setup();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey-nospeed.plan")
        .args(["-a", "80", "-f", "1", "-s", "6", "-n", "override", "-y"])
        .assert()
        .success();

    let conn = Connection::open(&db).unwrap();
    let (id, speed, action): (i64, f64, i64) = conn
        .query_row(
            &format!(
                "SELECT missionId, autoFlightSpeed, finishedAction FROM \"{}\" WHERE missionName = 'override'",
                MISSIONS
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(6., speed);
    assert_eq!(1, action);

    let altitude: f64 = conn
        .query_row(
            &format!(
                "SELECT DISTINCT altitude FROM \"{}\" WHERE missionId = ?1",
                WAYPOINTS
            ),
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(80., altitude);
}

#[test]
fn test_convert_dry_run() {
    let (dir, db) = setup();
    let before = fs::read(&db).unwrap();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey.plan")
        .arg("--dry-run")
        .assert()
        .success();

    assert_eq!(before, fs::read(&db).unwrap());
    assert!(!dir.path().join("way_point_2.db.bak").exists());
}

#[test]
fn test_convert_declined() {
    let (dir, db) = setup();
    let before = fs::read(&db).unwrap();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey.plan")
        .write_stdin("n\n")
        .assert()
        .failure();

    assert_eq!(before, fs::read(&db).unwrap());
    assert!(!dir.path().join("way_point_2.db.bak").exists());
}

#[test]
fn test_convert_reprompt() {
    let (dir, db) = setup();

    let out = qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey.plan")
        .write_stdin("maybe\ny\n")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert_eq!(2, stdout.matches("[y/n]").count());

    assert_eq!(2, count(&db, MISSIONS));
}

#[test]
fn test_convert_no_backup() {
    let (dir, db) = setup();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/survey.plan")
        .arg("--no-backup")
        .arg("-y")
        .assert()
        .success();

    assert_eq!(2, count(&db, MISSIONS));
    assert!(!dir.path().join("way_point_2.db.bak").exists());
}

#[test]
fn test_convert_no_survey() {
    let (dir, db) = setup();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(&db)
        .arg("-i")
        .arg("testdata/nosurvey.plan")
        .arg("-y")
        .assert()
        .failure();

    assert_eq!(1, count(&db, MISSIONS));
}

#[test]
fn test_convert_missing_database() {
    let dir = tempfile::tempdir().unwrap();

    qgc2dji(dir.path())
        .arg("-d")
        .arg(dir.path().join("nope.db"))
        .arg("-i")
        .arg("testdata/survey.plan")
        .arg("-y")
        .assert()
        .failure();
}

#[test]
fn test_convert_config_file() {
    let (dir, db) = setup();
    let cfg = dir.path().join("qgc2dji.hcl");
    fs::write(
        &cfg,
        format!(
            "version = 1\ndatabase = \"{}\"\nname_prefix = \"cfg-\"\nbackup = false\n",
            db.display()
        ),
    )
    .unwrap();

    qgc2dji(dir.path())
        .arg("-c")
        .arg(&cfg)
        .arg("-i")
        .arg("testdata/survey.plan")
        .arg("-y")
        .assert()
        .success();

    let conn = Connection::open(&db).unwrap();
    let name: String = conn
        .query_row(
            &format!(
                "SELECT missionName FROM \"{}\" WHERE missionId != 54321",
                MISSIONS
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(name.starts_with("cfg-"));
    assert!(!dir.path().join("way_point_2.db.bak").exists());
}
