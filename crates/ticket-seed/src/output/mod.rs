pub mod manifest;
pub mod sql;
pub mod sqlite;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::GeneratorConfig;
use crate::data::generator::generate_seeded;
use crate::error::SeedResult;
use manifest::write_run_manifest;
use sql::{write_sql_file, SqlSchema};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlExport {
    pub entries: usize,
    pub bytes: u64,
    pub manifest: Option<PathBuf>,
}

/// Generates the whole range before touching `out`, so a rejected config or
/// range leaves no script and no manifest behind.
pub fn export_sql(
    config: &GeneratorConfig,
    start: NaiveDate,
    end: NaiveDate,
    seed: u64,
    out: &Path,
    schema: SqlSchema,
    with_manifest: bool,
) -> SeedResult<SqlExport> {
    let entries = generate_seeded(start, end, config, seed)?;
    let bytes = write_sql_file(out, &entries, schema)?;
    let manifest = if with_manifest {
        Some(write_run_manifest(out, seed, start, end, entries.len(), schema)?)
    } else {
        None
    };
    Ok(SqlExport {
        entries: entries.len(),
        bytes,
        manifest,
    })
}
