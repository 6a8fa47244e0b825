//! Database loader: opens a user-supplied byte buffer as a queryable
//! SQLite database.
//!
//! The buffer is backed by a temporary file that lives exactly as long as
//! the handle, so the caller can hand over bytes read from anywhere and
//! still get rusqlite's file-based read path.

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::models::DbFormat;

/// First 16 bytes of every SQLite 3 file.
const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";

/// An open, queryable song database of a known format.
///
/// Exclusively owned by the single in-flight check; released via
/// [`SongDatabase::close`] when the extraction is done (`Drop` covers the
/// failure paths).
#[derive(Debug)]
pub struct SongDatabase {
    conn: Connection,
    format: DbFormat,
    // Keeps the backing file alive while the connection is open.
    _backing: Option<NamedTempFile>,
}

impl SongDatabase {
    /// Open a raw byte buffer as a read-only database.
    ///
    /// Fails at open time when the bytes are not a valid SQLite file: the
    /// header magic is checked first, then the schema is read so corrupt
    /// content surfaces the underlying SQLite error here rather than at
    /// query time.
    pub fn from_bytes(bytes: &[u8], format: DbFormat) -> Result<Self> {
        if bytes.len() < SQLITE_MAGIC.len() || &bytes[..SQLITE_MAGIC.len()] != SQLITE_MAGIC {
            bail!("not a SQLite database (bad file header)");
        }

        let mut backing =
            NamedTempFile::new().context("failed to create backing file for database")?;
        backing
            .write_all(bytes)
            .context("failed to write database bytes to backing file")?;
        backing
            .flush()
            .context("failed to flush database backing file")?;

        let conn = Connection::open_with_flags(
            backing.path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("failed to open database")?;

        let db = SongDatabase {
            conn,
            format,
            _backing: Some(backing),
        };
        db.probe()?;
        Ok(db)
    }

    /// Open a database file in place (no byte-buffer copy).
    pub fn open(path: &Path, format: DbFormat) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open database '{}'", path.display()))?;

        let db = SongDatabase {
            conn,
            format,
            _backing: None,
        };
        db.probe()?;
        Ok(db)
    }

    // Forces SQLite to actually parse the header and schema; a lazily
    // opened corrupt file would otherwise only fail on the first query.
    fn probe(&self) -> Result<()> {
        self.conn
            .query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .context("failed to read database schema")?;
        Ok(())
    }

    pub fn format(&self) -> DbFormat {
        self.format
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Explicitly release the handle (and its backing file).
    pub fn close(self) -> Result<()> {
        if let Err((_conn, err)) = self.conn.close() {
            return Err(err).context("failed to close database");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::tempdir;

    /// Build a minimal LR2-shaped database on disk and return its bytes.
    fn lr2_db_bytes() -> Vec<u8> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE song (hash TEXT, title TEXT, subtitle TEXT, path TEXT);
             INSERT INTO song VALUES ('abc', 'Song A', '', 'a/1.bms');",
        )
        .unwrap();
        conn.close().unwrap();
        std::fs::read(&path).unwrap()
    }

    #[test]
    fn test_from_bytes_opens_valid_database() {
        let bytes = lr2_db_bytes();
        let db = SongDatabase::from_bytes(&bytes, DbFormat::Lr2).unwrap();
        assert_eq!(db.format(), DbFormat::Lr2);
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM song", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        db.close().unwrap();
    }

    #[test]
    fn test_from_bytes_rejects_bad_header() {
        let result = SongDatabase::from_bytes(b"this is not a database", DbFormat::Lr2);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("bad file header"));
    }

    #[test]
    fn test_from_bytes_rejects_empty_buffer() {
        assert!(SongDatabase::from_bytes(&[], DbFormat::Beatoraja).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_corrupt_body() {
        // Valid magic followed by garbage fails the schema probe.
        let mut bytes = Vec::from(SQLITE_MAGIC);
        bytes.extend(std::iter::repeat(0xAB).take(4096));
        let result = SongDatabase::from_bytes(&bytes, DbFormat::Lr2);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songdata.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE song (md5 TEXT, path TEXT);")
            .unwrap();
        conn.close().unwrap();

        let db = SongDatabase::open(&path, DbFormat::Beatoraja).unwrap();
        assert_eq!(db.format(), DbFormat::Beatoraja);
        db.close().unwrap();
    }
}
