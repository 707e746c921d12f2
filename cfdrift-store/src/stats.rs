//! SQLite-backed statistics database access.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use cfdrift_core::{CoreError, CountStore};

use crate::error::StoreError;

/// Read-only handle on the persisted statistics database.
///
/// The connection lives for the scope of the handle and is released on
/// drop, on every exit path.
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Opens the statistics database at `path`, read-only.
    ///
    /// # Errors
    ///
    /// [`StoreError::Sqlite`] when the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!(path = %path.display(), "Opening statistics database");
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Opens a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// [`StoreError::Sqlite`] when the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Runs one aggregate query and returns the first column of the first
    /// row.
    ///
    /// # Errors
    ///
    /// [`StoreError::Sqlite`] when the query fails, or
    /// [`StoreError::NegativeCount`] when the aggregate is negative.
    pub fn query_count(&self, sql: &str) -> Result<u64, StoreError> {
        debug!(sql, "Running aggregate query");
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| StoreError::NegativeCount(count))
    }
}

impl CountStore for StatsDb {
    fn query_count(&mut self, sql: &str) -> Result<u64, CoreError> {
        StatsDb::query_count(self, sql).map_err(|err| CoreError::Store(err.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db() -> StatsDb {
        let db = StatsDb::open_in_memory().unwrap();
        db.conn
            .execute_batch(
                "CREATE TABLE applications (GUID TEXT, NAME TEXT);
                 INSERT INTO applications VALUES ('g-1', 'app-a');
                 INSERT INTO applications VALUES ('g-1', 'app-a-restage');
                 INSERT INTO applications VALUES ('g-2', 'app-b');
                 INSERT INTO applications VALUES ('g-3', 'app-c');",
            )
            .unwrap();
        db
    }

    #[test]
    fn counts_distinct_guids() {
        let db = seeded_db();
        let count = db
            .query_count("SELECT COUNT(DISTINCT GUID) FROM applications")
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn empty_table_counts_zero() {
        let db = StatsDb::open_in_memory().unwrap();
        db.conn
            .execute_batch("CREATE TABLE applications (GUID TEXT);")
            .unwrap();
        let count = db
            .query_count("SELECT COUNT(DISTINCT GUID) FROM applications")
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn missing_table_propagates_the_error() {
        let db = StatsDb::open_in_memory().unwrap();
        let err = db
            .query_count("SELECT COUNT(DISTINCT GUID) FROM applications")
            .unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn negative_aggregate_is_rejected() {
        let db = StatsDb::open_in_memory().unwrap();
        let err = db.query_count("SELECT -1").unwrap_err();
        assert!(matches!(err, StoreError::NegativeCount(-1)));
    }

    #[test]
    fn open_rejects_a_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StatsDb::open(&dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn open_reads_a_database_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");

        let writer = Connection::open(&path).unwrap();
        writer
            .execute_batch(
                "CREATE TABLE applications (GUID TEXT);
                 INSERT INTO applications VALUES ('g-1');
                 INSERT INTO applications VALUES ('g-2');",
            )
            .unwrap();
        drop(writer);

        let db = StatsDb::open(&path).unwrap();
        let count = db
            .query_count("SELECT COUNT(DISTINCT GUID) FROM applications")
            .unwrap();
        assert_eq!(count, 2);
    }
}
