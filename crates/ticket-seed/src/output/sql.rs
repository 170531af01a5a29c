use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Datelike;
use clap::ValueEnum;

use crate::data::datasets::SyntheticEntry;
use crate::error::SeedResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column layout of the rendered `entries` inserts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SqlSchema {
    /// `id, entry_type, price` after a `DELETE FROM entries`.
    Simple,
    /// Date-dimension columns inside a transaction that creates the table.
    Calendar,
}

impl SqlSchema {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Calendar => "calendar",
        }
    }
}

const CALENDAR_COLUMNS: &str =
    "entry_date, entry_timestamp, entry_type, price, year, month, week, day";

const CALENDAR_TABLE: &str = "CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_date DATE NOT NULL,
    entry_timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    entry_type TEXT NOT NULL,
    price REAL NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    week INTEGER NOT NULL,
    day INTEGER NOT NULL
);
";

pub fn render_sql<W: Write>(
    entries: &[SyntheticEntry],
    schema: SqlSchema,
    out: &mut W,
) -> SeedResult<()> {
    match schema {
        SqlSchema::Simple => {
            writeln!(out, "-- SQL statements for test data")?;
            writeln!(out, "DELETE FROM entries;")?;
            for entry in entries {
                writeln!(
                    out,
                    "INSERT INTO entries (id, entry_type, price) VALUES ({}, {}, {});",
                    entry.id,
                    quote(&entry.entry_type),
                    entry.price
                )?;
            }
        }
        SqlSchema::Calendar => {
            writeln!(out, "BEGIN TRANSACTION;")?;
            writeln!(out)?;
            writeln!(out, "{CALENDAR_TABLE}")?;
            for entry in entries {
                let date = entry.entry_date();
                writeln!(
                    out,
                    "INSERT INTO entries ({CALENDAR_COLUMNS}) \
                     VALUES ('{}', '{}', {}, {}, {}, {}, {}, {});",
                    date.format("%Y-%m-%d"),
                    entry.timestamp.format(TIMESTAMP_FORMAT),
                    quote(&entry.entry_type),
                    entry.price,
                    date.year(),
                    date.month(),
                    date.iso_week().week(),
                    date.day()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "COMMIT;")?;
        }
    }
    Ok(())
}

/// Writes the script to `path`, creating parent directories. Returns the file size in bytes.
pub fn write_sql_file(
    path: &Path,
    entries: &[SyntheticEntry],
    schema: SqlSchema,
) -> SeedResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    render_sql(entries, schema, &mut writer)?;
    writer.flush()?;
    Ok(fs::metadata(path)?.len())
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
