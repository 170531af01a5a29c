use std::fmt;
use std::path::Path;

use rusqlite::{params, params_from_iter, Connection};
use tracing::info;

use crate::data::datasets::SyntheticEntry;
use crate::error::{SeedError, SeedResult};

const CREATE_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY,
    entry_type TEXT NOT NULL,
    price DECIMAL(10,2) NOT NULL,
    created_at TIMESTAMP NOT NULL
)";

/// Opens or creates the database file; `:memory:` opens a private in-memory database.
pub fn open_database(path: &Path) -> SeedResult<Connection> {
    let conn = if path.as_os_str() == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };
    Ok(conn)
}

/// Inserts every entry in one transaction. An id that already exists fails
/// the whole batch unless `replace` is set.
pub fn insert_entries(
    conn: &mut Connection,
    entries: &[SyntheticEntry],
    replace: bool,
) -> SeedResult<usize> {
    let tx = conn.transaction()?;
    tx.execute(CREATE_ENTRIES, [])?;
    let sql = if replace {
        "INSERT OR REPLACE INTO entries (id, entry_type, price, created_at) VALUES (?1, ?2, ?3, ?4)"
    } else {
        "INSERT INTO entries (id, entry_type, price, created_at) VALUES (?1, ?2, ?3, ?4)"
    };
    {
        let mut stmt = tx.prepare(sql)?;
        for entry in entries {
            let id = i64::try_from(entry.id).map_err(|_| {
                SeedError::InvalidArgument(format!(
                    "entry id {} does not fit in SQLite INTEGER",
                    entry.id
                ))
            })?;
            stmt.execute(params![
                id,
                entry.entry_type,
                f64::from(entry.price),
                entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])?;
        }
    }
    tx.commit()?;
    info!(rows = entries.len(), "inserted entries");
    Ok(entries.len())
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationReport {
    pub total: u64,
    pub by_type: Vec<(String, u64)>,
    pub by_day_type: Vec<(String, u64)>,
    pub promotional_by_week: Vec<(String, u64)>,
}

impl ValidationReport {
    pub fn count_for(rows: &[(String, u64)], label: &str) -> u64 {
        rows.iter()
            .find(|(name, _)| name == label)
            .map_or(0, |(_, count)| *count)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data Validation:")?;
        writeln!(f, "Total entries: {}", self.total)?;
        for (title, rows) in [
            ("Entries by type:", &self.by_type),
            ("Weekday vs Weekend distribution:", &self.by_day_type),
            ("Free/Artist ticket distribution:", &self.promotional_by_week),
        ] {
            writeln!(f)?;
            writeln!(f, "{title}")?;
            for (label, count) in rows {
                writeln!(f, "{label}: {count}")?;
            }
        }
        Ok(())
    }
}

/// Read-only aggregate checks over the `entries` table.
pub fn validation_report(
    conn: &Connection,
    promotional_types: &[&str],
) -> SeedResult<ValidationReport> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

    let by_type = grouped_counts(
        conn,
        "SELECT entry_type, COUNT(*) AS count
         FROM entries
         GROUP BY entry_type
         ORDER BY count DESC, entry_type ASC",
        &[],
    )?;

    let by_day_type = grouped_counts(
        conn,
        "SELECT
             CASE
                 WHEN strftime('%w', created_at) IN ('0', '6') THEN 'Weekend'
                 ELSE 'Weekday'
             END AS day_type,
             COUNT(*) AS count
         FROM entries
         GROUP BY day_type
         ORDER BY day_type",
        &[],
    )?;

    let promotional_by_week = if promotional_types.is_empty() {
        Vec::new()
    } else {
        let placeholders = vec!["?"; promotional_types.len()].join(", ");
        grouped_counts(
            conn,
            &format!(
                "SELECT
                     CASE
                         WHEN strftime('%d', created_at) <= '07' THEN 'First Week'
                         ELSE 'Rest of Month'
                     END AS week_type,
                     COUNT(*) AS count
                 FROM entries
                 WHERE entry_type IN ({placeholders})
                 GROUP BY week_type
                 ORDER BY week_type"
            ),
            promotional_types,
        )?
    };

    Ok(ValidationReport {
        total: total as u64,
        by_type,
        by_day_type,
        promotional_by_week,
    })
}

fn grouped_counts(conn: &Connection, sql: &str, args: &[&str]) -> SeedResult<Vec<(String, u64)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
