//! Convert QGroundControl survey waypoints into a DJI GO 4 waypoint mission.
//!
//! The DJI GO 4 database must be copied from the device first and put back afterwards.
//!

use std::io;

use clap::{crate_authors, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};

use qgc2dji::{convert, Config, Opts, Outcome};
use qgc2dji_common::{init_logging, version};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.use_tree, opts.use_file.clone())?;
    trace!("Logging initialised.");

    info!("{}/{} by {}", NAME, VERSION, AUTHORS);
    trace!("Using {}", version());

    let cfg = Config::load(opts.config.as_deref())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match convert(&opts, &cfg, &mut input, &mut output)? {
        Outcome::Written { mission_id, backup } => {
            info!("Mission {} written, backup in {:?}", mission_id, backup)
        }
        Outcome::DryRun { mission_id } => info!("Dry run, mission {} not written", mission_id),
    }
    Ok(())
}
