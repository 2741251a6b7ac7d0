//! Human-readable summary of what is about to be written.
//!

use tabled::builder::Builder;
use tabled::settings::Style;

use qgc2dji_formats::{MissionRecord, WaypointRecord};

/// Display the derived mission parameters as a table.
///
pub fn summary(mission: &MissionRecord, waypoints: &[WaypointRecord]) -> String {
    let altitude = waypoints
        .first()
        .map(|wp| format!("{} m", wp.altitude))
        .unwrap_or("-".to_string());

    let mut builder = Builder::default();
    builder.push_record(vec!["Mission name".to_string(), mission.mission_name.clone()]);
    builder.push_record(vec!["Mission id".to_string(), mission.mission_id.to_string()]);
    builder.push_record(vec![
        "Max flight speed".to_string(),
        format!("{} m/s", mission.max_flight_speed),
    ]);
    builder.push_record(vec![
        "Cruise speed".to_string(),
        format!("{} m/s", mission.auto_flight_speed),
    ]);
    builder.push_record(vec!["Altitude".to_string(), altitude]);
    builder.push_record(vec![
        "Route distance".to_string(),
        format!("{} m", mission.rout_distance),
    ]);
    builder.push_record(vec!["Waypoints".to_string(), mission.point_count.to_string()]);
    builder.push_record(vec![
        "Finish action".to_string(),
        mission.finished_action.to_string(),
    ]);

    let table = builder.build().with(Style::modern()).to_string();
    format!("======= MISSION DATA =======\n{table}")
}
