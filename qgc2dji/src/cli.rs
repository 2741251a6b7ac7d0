use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

/// CLI options
#[derive(Debug, Parser)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// DJI GO 4 database file (way_point_2.db).
    #[clap(short = 'd', long)]
    pub dbfile: Option<PathBuf>,
    /// QGroundControl plan file (JSON).
    #[clap(short = 'i', long)]
    pub infile: PathBuf,
    /// Altitude above ground, in meters (default is the survey camera distance).
    #[clap(short = 'a', long)]
    pub altitude: Option<f64>,
    /// Action to perform upon mission completion [0, 1, 2, 3 or 4 - hover] (default: 4).
    #[clap(short = 'f', long = "finishaction", value_parser = clap::value_parser!(u8).range(0..=4))]
    pub finish_action: Option<u8>,
    /// Name for the mission (default: qgc2dji-survey_<date-time>).
    #[clap(short = 'n', long)]
    pub name: Option<String>,
    /// Cruise speed in m/s.
    #[clap(short = 's', long)]
    pub speed: Option<f64>,
    /// Do not ask for confirmation.
    #[clap(short = 'y', long)]
    pub yes: bool,
    /// Display the mission and stop.
    #[clap(long)]
    pub dry_run: bool,
    /// Do not make a copy of the database before writing.
    #[clap(long)]
    pub no_backup: bool,
    /// Hierarchical traces.
    #[clap(long)]
    pub use_tree: bool,
    /// Also log into files in this directory.
    #[clap(long)]
    pub use_file: Option<String>,
}
