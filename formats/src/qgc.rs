//! This is the `.plan` file format used by QGroundControl.
//!
//! Only the bits we need are described here, everything else in the file is silently ignored:
//!
//! - `mission.items[]` is a list of either `SimpleItem` (a single MAVLink command with its
//!   `params`) or `ComplexItem` (survey, corridor scan, etc.).
//! - a survey is a `ComplexItem` holding a `TransectStyleComplexItem` with the flattened
//!   list of points to fly through (`VisualTransectPoints`) and the camera settings
//!   (`CameraCalc`) where the distance to the ground is.
//!
//! Example (abridged):
//!
//! ```json
//! {
//!   "fileType": "Plan",
//!   "groundStation": "QGroundControl",
//!   "mission": {
//!     "items": [
//!       { "type": "SimpleItem", "command": 178, "params": [1, 5, -1, 0, 0, 0, 0] },
//!       { "type": "ComplexItem", "complexItemType": "survey",
//!         "TransectStyleComplexItem": {
//!           "CameraCalc": { "DistanceToSurface": 60 },
//!           "VisualTransectPoints": [[-19.99146, 57.60103], [-19.99061, 57.60185]]
//!         }
//!       }
//!     ]
//!   },
//!   "version": 1
//! }
//! ```
//!

use std::fs;
use std::path::Path;
use std::str::FromStr;

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use qgc2dji_common::Coordinate;

/// Top-level structure of a `.plan` file.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFile {
    /// Should always be "Plan"
    pub file_type: Option<String>,
    /// File format version
    pub version: Option<u32>,
    /// Who wrote it, usually "QGroundControl"
    pub ground_station: Option<String>,
    /// The mission itself
    pub mission: Mission,
}

/// Mission part of the plan, fences & rally points are not interesting here.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    /// All mission items, in flight order
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One mission item, simple or complex.
///
/// We keep the union of the fields of interest, `kind` says which one it really is.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// "SimpleItem" or "ComplexItem"
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// MAVLink command for simple items
    pub command: Option<u32>,
    /// MAVLink parameters for simple items, QGC writes `null` for unused ones
    #[serde(default)]
    pub params: Vec<Option<f64>>,
    /// "survey", "CorridorScan", etc. for complex items
    pub complex_item_type: Option<String>,
    /// Transect data for surveys
    #[serde(rename = "TransectStyleComplexItem")]
    pub transect: Option<TransectStyleComplexItem>,
}

/// The part of a survey that we actually use.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransectStyleComplexItem {
    /// Camera parameters
    pub camera_calc: Option<CameraCalc>,
    /// All the points of the pattern as `[lat, lon]`
    #[serde(default)]
    pub visual_transect_points: Vec<(f64, f64)>,
}

/// Camera settings, only the height above ground matters to us.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraCalc {
    /// Distance between camera and ground in meters
    pub distance_to_surface: Option<f64>,
}

impl PlanFile {
    /// Read and parse a `.plan` file
    ///
    #[tracing::instrument]
    pub fn load(fname: &Path) -> Result<PlanFile> {
        trace!("Reading {:?}", fname);
        let data = fs::read_to_string(fname)?;
        data.parse()
    }

    /// First item carrying transect data, if any.
    ///
    pub fn survey(&self) -> Option<&TransectStyleComplexItem> {
        self.mission.items.iter().find_map(|item| item.transect.as_ref())
    }
}

impl FromStr for PlanFile {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let plan: PlanFile = serde_json::from_str(s)?;
        debug!(
            "plan from {:?} v{:?}, {} items",
            plan.ground_station,
            plan.version,
            plan.mission.items.len()
        );
        Ok(plan)
    }
}

impl Item {
    /// Get parameter `n` (0-based) of a simple item, `null` counts as missing.
    ///
    pub fn param(&self, n: usize) -> Option<f64> {
        self.params.get(n).copied().flatten()
    }
}

impl TransectStyleComplexItem {
    /// Flight path as a list of coordinates, same order as the file.
    ///
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.visual_transect_points
            .iter()
            .copied()
            .map(Coordinate::from)
            .collect()
    }

    /// Height above ground set for the camera
    ///
    pub fn distance_to_surface(&self) -> Option<f64> {
        self.camera_calc.as_ref()?.distance_to_surface
    }
}
