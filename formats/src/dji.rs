//! DJI GO 4 "Waypoints 2.0" local database format.
//!
//! DJI GO 4 keeps its waypoint missions in an SQLite file (`way_point_2.db`) with one table for
//! the missions and one for their points.  The column names are the camelCase versions of the
//! field names below with a few oddities kept as-is (`routDistance`, `isEnableMultiPOI`,
//! `exitMissionOnRCSignalLost`, `myIndex`).
//!
//! Most of the columns have no equivalent in a QGroundControl survey, the `SurveyProfile`
//! holds the values we use for them: fly a fixed-altitude polyline at constant speed with the
//! camera pointing down.
//!

use serde::{Deserialize, Serialize};

/// Names of the two tables we write into.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tables {
    /// One row per mission
    pub mission: String,
    /// One row per waypoint, `missionId` is the link
    pub waypoint: String,
}

impl Default for Tables {
    fn default() -> Self {
        Tables {
            mission: "dji_pilot_dji_groundstation_waypoint2_model_WayPoint2MissionDBModel"
                .to_string(),
            waypoint:
                "dji_pilot_dji_groundstation_waypoint2_model_WayPoint2MissionDBModel$WayPoint2DBPoint"
                    .to_string(),
        }
    }
}

/// One mission row.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRecord {
    /// Arbitrary but unique
    pub mission_id: i64,
    pub is_use_custom_direction: i32,
    /// Milli-seconds since the epoch
    pub update_time: i64,
    /// What to do at the end: 0 to 4 (hover)
    pub finished_action: u8,
    pub first_lng: f64,
    /// Stored as an empty string
    pub local: String,
    #[serde(rename = "exitMissionOnRCSignalLost")]
    pub exit_mission_on_rc_signal_lost: i32,
    /// 0 is polyline
    pub flight_path_mode: i32,
    pub is_cache: i32,
    pub rotate_gimbal_pitch: i32,
    pub goto_first_waypoint_mode: i32,
    /// Number of waypoints
    pub point_count: i64,
    pub repeat_times: i32,
    /// Total length in meters, not a typo
    pub rout_distance: f64,
    pub first_lat: f64,
    pub mission_name: String,
    /// m/s
    pub max_flight_speed: f64,
    pub heading_mode: i32,
    /// Cruise speed in m/s
    pub auto_flight_speed: f64,
    #[serde(rename = "isEnableMultiPOI")]
    pub is_enable_multi_poi: i32,
}

impl MissionRecord {
    /// Column names, in the same order as the fields.
    ///
    pub const COLUMNS: [&'static str; 20] = [
        "missionId",
        "isUseCustomDirection",
        "updateTime",
        "finishedAction",
        "firstLng",
        "local",
        "exitMissionOnRCSignalLost",
        "flightPathMode",
        "isCache",
        "rotateGimbalPitch",
        "gotoFirstWaypointMode",
        "pointCount",
        "repeatTimes",
        "routDistance",
        "firstLat",
        "missionName",
        "maxFlightSpeed",
        "headingMode",
        "autoFlightSpeed",
        "isEnableMultiPOI",
    ];
}

/// One waypoint row.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointRecord {
    pub heading_type: i32,
    /// Meters above ground
    pub altitude: f64,
    /// Owning mission
    pub mission_id: i64,
    /// -1 is none
    pub poi_index: i32,
    pub heading: i32,
    pub latitude: f64,
    /// Action at the waypoint, 0 is nothing
    pub action: i32,
    /// Gimbal pitch in degrees
    pub pitch: f64,
    /// Turn radius
    pub radius: f64,
    /// 0 means use the mission cruise speed
    pub speed: f64,
    pub longitude: f64,
    /// 0-based position in the mission
    pub my_index: i64,
}

impl WaypointRecord {
    /// Column names, in the same order as the fields.
    ///
    pub const COLUMNS: [&'static str; 12] = [
        "headingType",
        "altitude",
        "missionId",
        "poiIndex",
        "heading",
        "latitude",
        "action",
        "pitch",
        "radius",
        "speed",
        "longitude",
        "myIndex",
    ];
}

/// Values applied to every waypoint.
///
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointDefaults {
    /// Free heading
    pub heading_type: i32,
    /// No point of interest
    pub poi_index: i32,
    /// Look ahead
    pub heading: i32,
    /// No photo or anything special at the waypoint, the camera is on a timer
    pub action: i32,
    /// Camera straight down
    pub pitch: f64,
    pub radius: f64,
    /// Defer to the mission cruise speed
    pub speed: f64,
}

impl Default for WaypointDefaults {
    fn default() -> Self {
        WaypointDefaults {
            heading_type: 0,
            poi_index: -1,
            heading: 0,
            action: 0,
            pitch: -90.0,
            radius: 2.0,
            speed: 0.0,
        }
    }
}

/// Values used for a mission when nothing better is available.
///
#[derive(Clone, Debug, PartialEq)]
pub struct MissionDefaults {
    /// m/s, ~30 km/h is a sane maximum for a survey
    pub max_flight_speed: f64,
    /// m/s, slow but safe
    pub cruise_speed: f64,
    /// Hover
    pub finish_action: u8,
    /// Generated names are `prefix` + local time in `name_format`
    pub name_prefix: String,
    /// `strftime`-like format
    pub name_format: String,
    pub is_use_custom_direction: i32,
    pub first_lng: f64,
    pub first_lat: f64,
    pub local: String,
    /// Keep flying
    pub exit_mission_on_rc_signal_lost: i32,
    /// Polyline
    pub flight_path_mode: i32,
    pub is_cache: i32,
    pub rotate_gimbal_pitch: i32,
    pub goto_first_waypoint_mode: i32,
    /// Fly it once
    pub repeat_times: i32,
    pub heading_mode: i32,
    pub is_enable_multi_poi: i32,
}

impl Default for MissionDefaults {
    fn default() -> Self {
        MissionDefaults {
            max_flight_speed: 8.3,
            cruise_speed: 3.5,
            finish_action: 4,
            name_prefix: "qgc2dji-survey_".to_string(),
            name_format: "%d%m%Y-%H%M%S".to_string(),
            is_use_custom_direction: 0,
            first_lng: 0.0,
            first_lat: 0.0,
            local: String::new(),
            exit_mission_on_rc_signal_lost: 0,
            flight_path_mode: 0,
            is_cache: 0,
            rotate_gimbal_pitch: 1,
            goto_first_waypoint_mode: 0,
            repeat_times: 1,
            heading_mode: 0,
            is_enable_multi_poi: 0,
        }
    }
}

/// Ground survey at fixed altitude and constant speed, nadir camera.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurveyProfile {
    pub mission: MissionDefaults,
    pub waypoint: WaypointDefaults,
}
