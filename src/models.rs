//! Core data models: database formats and duplicate song records.

use anyhow::bail;
use serde::Serialize;
use std::fmt;

/// File names the tool accepts. Anything else is rejected before any
/// bytes are read.
pub const BEATORAJA_DB_NAME: &str = "songdata.db";
pub const LR2_DB_NAME: &str = "song.db";

/// Song database format, resolved once from the input file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbFormat {
    /// LR2 (`song.db`): single `hash` content identifier.
    Lr2,
    /// beatoraja (`songdata.db`): dual `md5`/`sha256` identifiers.
    Beatoraja,
}

impl DbFormat {
    /// Resolve the format from the database file name.
    ///
    /// Only the two known names are accepted; any other name fails here,
    /// before the file is read or parsed.
    pub fn from_file_name(name: &str) -> anyhow::Result<Self> {
        match name {
            LR2_DB_NAME => Ok(DbFormat::Lr2),
            BEATORAJA_DB_NAME => Ok(DbFormat::Beatoraja),
            other => bail!(
                "unrecognized database file '{}' (expected '{}' or '{}')",
                other,
                BEATORAJA_DB_NAME,
                LR2_DB_NAME
            ),
        }
    }

    /// The file name this format is stored under.
    pub fn file_name(self) -> &'static str {
        match self {
            DbFormat::Lr2 => LR2_DB_NAME,
            DbFormat::Beatoraja => BEATORAJA_DB_NAME,
        }
    }
}

impl fmt::Display for DbFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbFormat::Lr2 => write!(f, "LR2"),
            DbFormat::Beatoraja => write!(f, "beatoraja"),
        }
    }
}

/// A group of stored songs sharing one content identifier.
///
/// Read-only projection of the aggregation result; only materialized when
/// the group has at least two members, so `paths().len() >= 2` always
/// holds. The two constructors replace the original field-presence check
/// with an explicit tag resolved at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum DuplicateSong {
    Lr2 {
        hash: String,
        title: String,
        subtitle: String,
        paths: Vec<String>,
    },
    Beatoraja {
        md5: String,
        /// Representative value for the group; empty when no member
        /// recorded a sha256.
        sha256: String,
        title: String,
        subtitle: String,
        paths: Vec<String>,
    },
}

impl DuplicateSong {
    pub fn title(&self) -> &str {
        match self {
            DuplicateSong::Lr2 { title, .. } => title,
            DuplicateSong::Beatoraja { title, .. } => title,
        }
    }

    pub fn subtitle(&self) -> &str {
        match self {
            DuplicateSong::Lr2 { subtitle, .. } => subtitle,
            DuplicateSong::Beatoraja { subtitle, .. } => subtitle,
        }
    }

    /// All file paths sharing this group's content identifier.
    pub fn paths(&self) -> &[String] {
        match self {
            DuplicateSong::Lr2 { paths, .. } => paths,
            DuplicateSong::Beatoraja { paths, .. } => paths,
        }
    }
}
