//! Definition of the two mission formats we know about
//!
//! - `qgc` is the input side, a QGroundControl `.plan` file (JSON), from which we only
//!   want the survey part.
//! - `dji` is the output side, the rows of the DJI GO 4 "Waypoints 2.0" database.
//!
//! DJI GO 4 needs a lot more than what QGroundControl gives us so the `dji` module also holds
//! the fixed profile used to fill the gaps.
//!

// Re-export for convenience
//
pub use dji::*;
pub use qgc::*;

mod dji;
mod qgc;
