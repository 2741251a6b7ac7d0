//! Where do we get the cruise speed from?
//!
//! In order:
//!
//! 1. the value given on the command line,
//! 2. the first `MAV_CMD_DO_CHANGE_SPEED` (178) item of the plan, speed is `params[1]`,
//! 3. the profile default (3.5 m/s unless configured otherwise).
//!
//! A zero at any step counts as "not set" and we go to the next one.
//!
//! NOTE: the position of the speed inside the 178 item has been found by looking at files
//!       written by QGroundControl, nothing guarantees that later releases will keep it there.
//!

use tracing::{debug, trace};

use qgc2dji_formats::Item;

/// MAVLink command code for changing speed.
pub const MAV_CMD_DO_CHANGE_SPEED: u32 = 178;

/// Index of the speed value in the parameter list of a 178 item.
const SPEED_PARAM: usize = 1;

/// Find the speed set in the plan, if any.
///
/// Only the first speed change is looked at, even if it does not carry a usable value.
///
pub fn cruise_speed_from_items(items: &[Item]) -> Option<f64> {
    let item = items
        .iter()
        .find(|item| item.command == Some(MAV_CMD_DO_CHANGE_SPEED))?;
    trace!("speed item = {:?}", item);

    let speed = item.param(SPEED_PARAM).filter(|&v| v != 0.0);
    debug!("speed from plan = {:?}", speed);
    speed
}

/// Run through the whole chain.
///
pub fn resolve_cruise_speed(explicit: Option<f64>, items: &[Item], fallback: f64) -> f64 {
    explicit
        .filter(|&v| v != 0.0)
        .or_else(|| cruise_speed_from_items(items))
        .unwrap_or(fallback)
}
