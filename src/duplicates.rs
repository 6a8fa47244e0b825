//! Duplicate extraction queries.
//!
//! Both variants follow one pattern: group path-bearing `song` rows by the
//! content-identifying column, keep groups with more than one member,
//! concatenate the group's paths with `|` and split the result back into an
//! ordered list.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::loader::SongDatabase;
use crate::models::{DbFormat, DuplicateSong};

/// Separator used by GROUP_CONCAT for the path list.
pub const PATH_SEPARATOR: char = '|';

const LR2_DUPLICATES_SQL: &str = "
    SELECT
        hash,
        title,
        subtitle,
        GROUP_CONCAT(path, '|') AS paths
    FROM song
    WHERE path <> ''
    GROUP BY hash
    HAVING COUNT(hash) > 1
    ORDER BY title, subtitle";

// max(sha256) picks a representative value when some rows in a group have
// it empty; kept as-is from the original tool.
const BEATORAJA_DUPLICATES_SQL: &str = "
    SELECT
        md5,
        max(sha256) AS sha256,
        title,
        subtitle,
        GROUP_CONCAT(path, '|') AS paths
    FROM song
    WHERE path <> ''
    GROUP BY sha256
    HAVING COUNT(sha256) > 1
    ORDER BY title, subtitle";

/// Run the variant-specific duplicate query against an open database.
pub fn find_duplicates(db: &SongDatabase) -> Result<Vec<DuplicateSong>> {
    match db.format() {
        DbFormat::Lr2 => lr2_duplicates(db.connection()),
        DbFormat::Beatoraja => beatoraja_duplicates(db.connection()),
    }
}

fn split_paths(joined: String) -> Vec<String> {
    joined.split(PATH_SEPARATOR).map(str::to_string).collect()
}

// Identifier and label columns may be NULL in the wild; read them as
// options and fall back to empty strings.
fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn lr2_duplicates(conn: &Connection) -> Result<Vec<DuplicateSong>> {
    let mut stmt = conn
        .prepare(LR2_DUPLICATES_SQL)
        .context("failed to prepare LR2 duplicate query (is this an LR2 song.db?)")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(DuplicateSong::Lr2 {
                hash: text(row.get(0)?),
                title: text(row.get(1)?),
                subtitle: text(row.get(2)?),
                paths: split_paths(row.get(3)?),
            })
        })
        .context("failed to run LR2 duplicate query")?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read LR2 duplicate rows")
}

fn beatoraja_duplicates(conn: &Connection) -> Result<Vec<DuplicateSong>> {
    let mut stmt = conn.prepare(BEATORAJA_DUPLICATES_SQL).context(
        "failed to prepare beatoraja duplicate query (is this a beatoraja songdata.db?)",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(DuplicateSong::Beatoraja {
                md5: text(row.get(0)?),
                sha256: text(row.get(1)?),
                title: text(row.get(2)?),
                subtitle: text(row.get(3)?),
                paths: split_paths(row.get(4)?),
            })
        })
        .context("failed to run beatoraja duplicate query")?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read beatoraja duplicate rows")
}
