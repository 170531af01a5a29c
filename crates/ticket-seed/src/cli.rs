use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};

use crate::config::GeneratorConfig;
use crate::error::{SeedError, SeedResult};
use crate::output::sql::SqlSchema;

/// Length of the default range ending today.
pub const DEFAULT_RANGE_DAYS: u64 = 365;

#[derive(Debug, Parser)]
#[command(
    name = "ticket-seed",
    about = "Generate synthetic ticket sales for seeding a test database"
)]
pub struct Args {
    #[arg(long, env = "TICKET_SEED_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
    #[arg(long, env = "TICKET_SEED_SEED")]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write INSERT statements to a .sql script.
    Sql {
        #[arg(long, default_value = "test_data.sql")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = SqlSchema::Calendar)]
        schema: SqlSchema,
        #[arg(long)]
        no_manifest: bool,
    },
    /// Insert directly into a local SQLite database and print a validation report.
    ///
    /// Ids are written explicitly starting at `first_id`, so a second run
    /// against the same database fails on duplicate ids unless `--replace`
    /// is given.
    Sqlite {
        #[arg(long, default_value = "entries.db")]
        db: PathBuf,
        #[arg(long)]
        replace: bool,
    },
    /// Print the effective configuration as YAML.
    Config,
}

pub fn parse_date(value: &str) -> SeedResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|error| {
        SeedError::InvalidArgument(format!("invalid date '{value}'; expected YYYY-MM-DD ({error})"))
    })
}

/// Fills in missing endpoints: `end` defaults to `today`, `start` to a year before `end`.
pub fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> SeedResult<(NaiveDate, NaiveDate)> {
    let end = end.unwrap_or(today);
    let start = match start {
        Some(start) => start,
        None => end.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)).ok_or_else(|| {
            SeedError::InvalidArgument(format!("cannot derive a start date before {end}"))
        })?,
    };
    Ok((start, end))
}

pub fn load_config(path: Option<&PathBuf>) -> SeedResult<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::load(path),
        None => Ok(GeneratorConfig::default()),
    }
}

/// The flag wins over the config file; with neither, a fresh seed is drawn.
pub fn resolve_seed(flag: Option<u64>, config: &GeneratorConfig) -> u64 {
    flag.or(config.seed).unwrap_or_else(rand::random)
}
