//! Turn a QGroundControl survey into DJI GO 4 rows.
//!
//! The `Mapper` gathers the user-supplied values (all optional) and the fixed `SurveyProfile`
//! then `build()` generates the mission row and all the waypoint rows in one go.  Nothing is
//! written anywhere, the only external input is the set of already used mission identifiers.
//!
//! ```no_run
//! # fn main() -> eyre::Result<()> {
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! use qgc2dji::Mapper;
//! use qgc2dji_formats::{PlanFile, SurveyProfile};
//!
//! let plan = PlanFile::load(Path::new("survey.plan"))?;
//! let profile = SurveyProfile::default();
//!
//! let (mission, waypoints) = Mapper::new(&profile)
//!     .altitude(Some(80.))
//!     .name(Some("quarry".to_string()))
//!     .build(&plan, &HashSet::new(), &mut rand::thread_rng())?;
//! # Ok(())
//! # }
//! ```
//!

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{debug, trace};

use qgc2dji_common::accumulate;
use qgc2dji_formats::{MissionRecord, PlanFile, SurveyProfile, WaypointRecord};

use crate::{resolve_cruise_speed, IdGenerator, Status};

/// Valid finish actions, 4 is hover.
pub const FINISH_ACTIONS: RangeInclusive<u8> = 0..=4;

/// Builder-like context for one conversion.
///
#[derive(Clone, Debug)]
pub struct Mapper<'a> {
    /// Fixed values
    profile: &'a SurveyProfile,
    /// Identifier generator
    ids: IdGenerator,
    /// Meters above ground, from the plan if not set
    altitude: Option<f64>,
    /// From the profile if not set
    finish_action: Option<u8>,
    /// See `speed` for the full chain
    cruise_speed: Option<f64>,
    /// Generated if not set
    name: Option<String>,
    /// Used for the generated name and the update time
    now: DateTime<Local>,
}

impl<'a> Mapper<'a> {
    pub fn new(profile: &'a SurveyProfile) -> Self {
        Mapper {
            profile,
            ids: IdGenerator::default(),
            altitude: None,
            finish_action: None,
            cruise_speed: None,
            name: None,
            now: Local::now(),
        }
    }

    /// Set the altitude for all waypoints
    ///
    pub fn altitude(mut self, altitude: Option<f64>) -> Self {
        self.altitude = altitude;
        self
    }

    /// Set the finish action
    ///
    pub fn finish_action(mut self, action: Option<u8>) -> Self {
        self.finish_action = action;
        self
    }

    /// Set the cruise speed
    ///
    pub fn cruise_speed(mut self, speed: Option<f64>) -> Self {
        self.cruise_speed = speed;
        self
    }

    /// Set the mission name, empty is the same as unset
    ///
    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Use a specific identifier generator
    ///
    pub fn ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Pretend we are running at `now`
    ///
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Generate all the rows.
    ///
    /// Fails with `MissingMissionData` if the plan has no survey, if the survey has no point
    /// or if we need the camera distance to the ground and it is not there.
    ///
    #[tracing::instrument(skip(self, plan, existing, rng))]
    pub fn build<R: Rng + ?Sized>(
        &self,
        plan: &PlanFile,
        existing: &HashSet<i64>,
        rng: &mut R,
    ) -> Result<(MissionRecord, Vec<WaypointRecord>), Status> {
        let defaults = &self.profile.mission;

        let survey = plan.survey().ok_or(Status::MissingMissionData)?;
        let coords = survey.coordinates();
        if coords.is_empty() {
            return Err(Status::MissingMissionData);
        }
        trace!("{} points in survey", coords.len());

        let altitude = match self.altitude {
            Some(altitude) => altitude,
            None => survey
                .distance_to_surface()
                .ok_or(Status::MissingMissionData)?,
        };

        let finish_action = self.finish_action.unwrap_or(defaults.finish_action);
        if !FINISH_ACTIONS.contains(&finish_action) {
            return Err(Status::BadFinishAction(finish_action));
        }

        let cruise_speed = resolve_cruise_speed(
            self.cruise_speed,
            &plan.mission.items,
            defaults.cruise_speed,
        );

        let mission_name = match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{}{}",
                defaults.name_prefix,
                self.now.format(&defaults.name_format)
            ),
        };

        let mission_id = self.ids.generate(rng, existing)?;

        // Every point gets the same treatment, only the position changes.
        //
        let wp = &self.profile.waypoint;
        let waypoints: Vec<WaypointRecord> = coords
            .iter()
            .enumerate()
            .map(|(n, c)| WaypointRecord {
                heading_type: wp.heading_type,
                altitude,
                mission_id,
                poi_index: wp.poi_index,
                heading: wp.heading,
                latitude: c.lat,
                action: wp.action,
                pitch: wp.pitch,
                radius: wp.radius,
                speed: wp.speed,
                longitude: c.lon,
                my_index: n as i64,
            })
            .collect();

        let rout_distance = accumulate(&coords);

        let mission = MissionRecord {
            mission_id,
            is_use_custom_direction: defaults.is_use_custom_direction,
            update_time: self.now.timestamp_millis(),
            finished_action: finish_action,
            first_lng: defaults.first_lng,
            local: defaults.local.clone(),
            exit_mission_on_rc_signal_lost: defaults.exit_mission_on_rc_signal_lost,
            flight_path_mode: defaults.flight_path_mode,
            is_cache: defaults.is_cache,
            rotate_gimbal_pitch: defaults.rotate_gimbal_pitch,
            goto_first_waypoint_mode: defaults.goto_first_waypoint_mode,
            point_count: waypoints.len() as i64,
            repeat_times: defaults.repeat_times,
            rout_distance,
            first_lat: defaults.first_lat,
            mission_name,
            max_flight_speed: defaults.max_flight_speed,
            heading_mode: defaults.heading_mode,
            auto_flight_speed: cruise_speed,
            is_enable_multi_poi: defaults.is_enable_multi_poi,
        };
        debug!("mission = {:?}", mission);

        Ok((mission, waypoints))
    }
}
