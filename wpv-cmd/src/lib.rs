//! Command implementations for the WPV CLI.
//!
//! Provides subcommands for listing the well catalog, printing aggregated
//! series for a selection, and replaying scripted selection sessions.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod replay;
pub mod series;
pub mod store;
pub mod wells;

/// Where the well data comes from.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding wells.csv, well_types.csv, production.csv and injection.csv
    #[arg(short = 'd', long, env = "WPV_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Existing SQLite database, opened read-only (takes precedence over --data-dir)
    #[arg(long, env = "WPV_DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Leave out wells whose name contains this marker (e.g. PLA)
    #[arg(long, env = "WPV_EXCLUDE_MARKER", global = true)]
    pub exclude_marker: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// metric,date,value rows
    Csv,
    /// Chart payload JSON
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List catalog wells
    Wells {
        /// Only wells whose name contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only wells in these reservoirs
        #[arg(short, long)]
        reservoir: Vec<String>,
    },

    /// List reservoir tags present in the catalog
    Reservoirs,

    /// Aggregate a selection and print its chart series
    Series {
        /// Well ids to select
        ids: Vec<String>,

        /// Also select every well whose name matches this text
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Print calendar-day rates instead of monthly volumes
        #[arg(long)]
        rates: bool,
    },

    /// Replay a script of selection events through a session
    Replay {
        /// Script file, one event per line
        file: PathBuf,

        /// Searches replace the selection instead of only listing matches
        #[arg(long)]
        select_matches: bool,
    },
}

pub fn run(data: &DataArgs, command: Command) -> anyhow::Result<()> {
    let db = store::open_store(data)?;
    let options = store::catalog_options(data);
    let mut out = std::io::stdout().lock();
    match command {
        Command::Wells { search, reservoir } => {
            wells::run_wells(&db, &options, search.as_deref(), &reservoir, &mut out)
        }
        Command::Reservoirs => wells::run_reservoirs(&db, &options, &mut out),
        Command::Series {
            ids,
            search,
            format,
            rates,
        } => series::run_series(
            &db,
            &options,
            &ids,
            search.as_deref(),
            format,
            rates,
            &mut out,
        ),
        Command::Replay {
            file,
            select_matches,
        } => {
            let script = std::fs::read_to_string(&file)?;
            replay::run_replay(&db, &options, &script, select_matches, &mut out)
        }
    }
}
