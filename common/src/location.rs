//! Location related module
//!
//! We only deal with horizontal positions here: a `Coordinate` is a (latitude, longitude) pair
//! in decimal degrees, and the only operation we need is the length of a path made of such
//! points, flown in the given order.
//!
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Earth radius in meters.
///
/// NOTE: DJI GO 4 computes its route distances with 6 371 000 m and not the usual
///       6 372 800 m mean radius, use the same so that both sides agree.
///
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// A single point on the surface, no altitude.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }

    /// Great-circle distance to `other` in meters, using the haversine formula.
    ///
    /// Values are not checked, anything outside of [-90,90]/[-180,180] is used as-is.
    ///
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// `(lat, lon)` as found in most JSON files.
///
impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Coordinate { lat, lon }
    }
}

/// Total length of the path going through every point of `coords` in order, in meters.
///
/// Anything with less than two points has a length of 0.
///
#[tracing::instrument(skip(coords))]
pub fn accumulate(coords: &[Coordinate]) -> f64 {
    let dist = coords
        .windows(2)
        .map(|pair| pair[0].haversine_distance(&pair[1]))
        .fold(0.0, |acc, d| acc + d);
    trace!("{} points, {} m", coords.len(), dist);
    dist
}
