//! The whole conversion, from the command-line options to the database.
//!
//! Steps:
//!
//! 1. check that both files are there,
//! 2. open the database and read the mission identifiers already in use,
//! 3. parse the plan and generate the rows,
//! 4. show the summary and ask (unless `--yes` or `--dry-run`),
//! 5. backup the database file (unless `--no-backup` or `backup = false`),
//! 6. insert everything.
//!
//! Any error before the last step leaves the database untouched.
//!

use std::io::{BufRead, Write};
use std::path::PathBuf;

use eyre::Result;
use tracing::{debug, info, trace};

use qgc2dji_formats::{MissionRecord, PlanFile, Tables};

use crate::{confirm, summary, Config, Mapper, MissionStore, Opts, Status};

/// What happened in the end.
///
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Written, with the backup file if one was made
    Written {
        mission_id: i64,
        backup: Option<PathBuf>,
    },
    /// `--dry-run`
    DryRun { mission_id: i64 },
}

/// Run a conversion.
///
/// `input` and `output` are for the summary and the confirmation, usually stdin and stdout.
///
#[tracing::instrument(skip(cfg, input, output))]
pub fn convert<R, W>(opts: &Opts, cfg: &Config, input: &mut R, output: &mut W) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    // Command-line wins over the configuration file.
    //
    let dbfile = match (&opts.dbfile, &cfg.database) {
        (Some(db), _) => db.clone(),
        (None, Some(db)) => PathBuf::from(db),
        (None, None) => return Err(Status::NoDatabase("qgc2dji.hcl".to_string()).into()),
    };
    debug!("dbfile = {:?}", dbfile);

    if !opts.infile.is_file() {
        return Err(Status::InputNotFound(opts.infile.display().to_string()).into());
    }

    let mut store = MissionStore::open(&dbfile, Tables::default())?;
    let existing = store.mission_ids()?;

    info!("Reading {:?}", opts.infile);
    let plan = PlanFile::load(&opts.infile)?;

    let profile = cfg.profile();
    let (mission, waypoints) = Mapper::new(&profile)
        .ids(cfg.ids())
        .altitude(opts.altitude)
        .finish_action(opts.finish_action)
        .cruise_speed(opts.speed)
        .name(opts.name.clone())
        .build(&plan, &existing, &mut rand::thread_rng())?;
    trace!("{} waypoints", waypoints.len());

    writeln!(output, "\n{}\n", summary(&mission, &waypoints))?;

    if opts.dry_run {
        info!("Dry run, not updating database.");
        return Ok(Outcome::DryRun {
            mission_id: mission.mission_id,
        });
    }

    if !opts.yes && !confirm(input, output, "Write out to database?")? {
        return Err(Status::Aborted.into());
    }

    let backup = if opts.no_backup || !cfg.backup() {
        None
    } else {
        Some(store.backup()?)
    };

    store.insert(&mission, &waypoints)?;
    report(output, &mission, &store)?;

    Ok(Outcome::Written {
        mission_id: mission.mission_id,
        backup,
    })
}

fn report<W: Write>(output: &mut W, mission: &MissionRecord, store: &MissionStore) -> Result<()> {
    writeln!(
        output,
        "Mission \"{}\" ({}) written into {:?}.",
        mission.mission_name,
        mission.mission_id,
        store.path()
    )?;
    Ok(())
}
