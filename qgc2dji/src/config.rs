//! Configuration module
//!
//! Everything here is optional, the converter works without any configuration file.  When one
//! is present (`-c` or `$HOME/.config/qgc2dji/qgc2dji.hcl`) it can provide the database path
//! and change some of the defaults of the survey profile.
//!
//! Example:
//!
//! ```hcl
//! version = 1
//!
//! database = "/sdcard/DJI/dji.go.v4/DJI_waypoints/way_point_2.db"
//! cruise_speed = 5
//! max_flight_speed = 10
//! name_prefix = "survey-"
//! backup = true
//! ```
//!

use std::path::Path;

use eyre::Result;
use serde::Deserialize;
use tracing::{debug, trace};

use qgc2dji_common::{ConfigFile, Versioned};
use qgc2dji_formats::SurveyProfile;

use crate::{IdGenerator, Status, ID_RANGE, MAX_ATTEMPTS};

/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool
///
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Config file versioning
    pub version: usize,
    /// Path to `way_point_2.db`
    pub database: Option<String>,
    /// Default finish action
    pub finish_action: Option<u8>,
    /// Cruise speed when nothing is in the plan
    pub cruise_speed: Option<f64>,
    /// Max flight speed for all missions
    pub max_flight_speed: Option<f64>,
    /// Prefix for generated names
    pub name_prefix: Option<String>,
    /// Copy the database before writing (default is true)
    pub backup: Option<bool>,
    /// Identifier draws before giving up
    pub max_attempts: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            database: None,
            finish_action: None,
            cruise_speed: None,
            max_flight_speed: None,
            name_prefix: None,
            backup: None,
            max_attempts: None,
        }
    }
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load the given file or the default one and check its version.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        let mut cfile = ConfigFile::<Config>::load(fname)?;
        trace!("config from {:?}", cfile.source());

        let cfg = std::mem::take(cfile.inner_mut());
        if cfg.version() != CVERSION {
            return Err(Status::BadFileVersion(cfg.version()).into());
        }
        debug!("config = {:?}", cfg);
        Ok(cfg)
    }

    /// Default profile with our overrides.
    ///
    pub fn profile(&self) -> SurveyProfile {
        let mut profile = SurveyProfile::default();

        if let Some(v) = self.finish_action {
            profile.mission.finish_action = v;
        }
        if let Some(v) = self.cruise_speed {
            profile.mission.cruise_speed = v;
        }
        if let Some(v) = self.max_flight_speed {
            profile.mission.max_flight_speed = v;
        }
        if let Some(v) = &self.name_prefix {
            profile.mission.name_prefix = v.clone();
        }
        profile
    }

    /// Identifier generator with our overrides.
    ///
    pub fn ids(&self) -> IdGenerator {
        IdGenerator::new(ID_RANGE, self.max_attempts.unwrap_or(MAX_ATTEMPTS))
    }

    /// Do we make a copy before writing?
    ///
    pub fn backup(&self) -> bool {
        self.backup.unwrap_or(true)
    }
}
