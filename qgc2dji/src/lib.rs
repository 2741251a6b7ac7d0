//! Library part of `qgc2dji`.
//!
//! Takes the survey (`TransectStyleComplexItem`) of a QGroundControl `.plan` file and adds it as
//! a new waypoint mission into the local database of DJI GO 4 so it can be flown with the
//! "Waypoints 2.0" mode.
//!
//! The pieces:
//!
//! - `Mapper` generates the mission and waypoint rows from a `PlanFile`,
//! - `MissionStore` reads the mission ids and writes the rows,
//! - `convert()` ties everything together for the CLI.
//!

pub use cli::*;
pub use config::*;
pub use convert::*;
pub use error::*;
pub use ident::*;
pub use mapper::*;
pub use prompt::*;
pub use speed::*;
pub use store::*;
pub use summary::*;

mod cli;
mod config;
mod convert;
mod error;
mod ident;
mod mapper;
mod prompt;
mod speed;
mod store;
mod summary;
