//! Mission identifier generation.
//!
//! DJI GO 4 does not care about the value of `missionId` as long as it is unique in its
//! database, existing entries look random and are all 5 digits so we do the same.  We draw
//! until we find a free one but give up after `max_attempts` draws.
//!

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, info};

use crate::Status;

/// Range of generated identifiers
pub const ID_RANGE: RangeInclusive<i64> = 10_000..=99_999;

/// Draws before giving up, way beyond anything a real database will need
pub const MAX_ATTEMPTS: usize = 1_000;

/// Random identifier generator, checks against a set of already used values.
///
#[derive(Clone, Debug)]
pub struct IdGenerator {
    range: RangeInclusive<i64>,
    max_attempts: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(ID_RANGE, MAX_ATTEMPTS)
    }
}

impl IdGenerator {
    pub fn new(range: RangeInclusive<i64>, max_attempts: usize) -> Self {
        IdGenerator {
            range,
            max_attempts,
        }
    }

    /// Change the number of draws allowed
    ///
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Draw an identifier not in `existing`.
    ///
    #[tracing::instrument(skip(self, rng, existing))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        existing: &HashSet<i64>,
    ) -> Result<i64, Status> {
        for attempt in 1..=self.max_attempts {
            let id = rng.gen_range(self.range.clone());
            if !existing.contains(&id) {
                debug!("mission id {} after {} draw(s)", id, attempt);
                return Ok(id);
            }
            info!("ID collision ({}). Generating new ID.", id);
        }
        Err(Status::IdentifierExhausted(self.max_attempts))
    }
}
