//! Error module
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("Input file {0} does not exist")]
    InputNotFound(String),
    #[error("Required survey data not present in the plan file")]
    MissingMissionData,
    #[error("Could not use database {0}: {1}")]
    StoreUnavailable(String, String),
    #[error("No free mission id found after {0} attempts")]
    IdentifierExhausted(usize),
    #[error("Invalid finish action {0}, must be 0 to 4")]
    BadFinishAction(u8),
    #[error("No database specified anywhere, use -d or set it in {0}")]
    NoDatabase(String),
    #[error("Bad file version {0}")]
    BadFileVersion(usize),
    #[error("Exiting without updating database")]
    Aborted,
}
