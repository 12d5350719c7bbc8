//! Database connection and schema management.
//!
//! Provides a unified handle over the SQLite connection.

use crate::error::{DbError, Result};
use crate::schema;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Main database handle.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Open or create a database at the specified path and migrate it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Self {
            conn,
            path: path.to_string_lossy().to_string(),
        };
        db.configure()?;
        db.initialize()?;
        tracing::debug!(path = %db.path, "Opened paper store");
        Ok(db)
    }

    /// Open a private in-memory database (tests, dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
            path: ":memory:".to_string(),
        };
        db.configure()?;
        db.initialize()?;
        Ok(db)
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get the database path.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn configure(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;
        // Writers from another process wait instead of failing immediately.
        self.conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }

    /// Apply all pending migrations, each in its own transaction.
    pub fn initialize(&self) -> Result<()> {
        let current = self.schema_version()?;

        for (version, sql) in schema::migrations() {
            if version <= current {
                continue;
            }
            tracing::info!(version, "Running migration");
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(sql).map_err(|e| DbError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
            tx.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
                params![version, Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Current schema version (0 for a fresh file).
    pub fn schema_version(&self) -> Result<i64> {
        if !self.table_exists("schema_version")? {
            return Ok(0);
        }
        let version: Option<i64> = self.conn.query_row(
            "SELECT MAX(version) FROM schema_version",
            [],
            |row| row.get(0),
        )?;
        Ok(version.unwrap_or(0))
    }

    /// Check if a table exists.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Paper counts per status.
    pub fn stats(&self) -> Result<DatabaseStats> {
        let mut stats = DatabaseStats::default();
        let mut stmt = self.conn.prepare(
            "SELECT status, COUNT(*) FROM papers GROUP BY status",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for row in rows {
            let (status, count) = row?;
            let count = count as u64;
            stats.papers += count;
            match status.as_str() {
                "unpicked" => stats.unpicked = count,
                "selected" => stats.selected = count,
                "rejected_ineligible" => stats.rejected_ineligible = count,
                "rejected_below_threshold" => stats.rejected_below_threshold = count,
                other => tracing::warn!(status = other, count, "Unknown paper status in store"),
            }
        }

        Ok(stats)
    }
}

/// Database statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub papers: u64,
    pub unpicked: u64,
    pub selected: u64,
    pub rejected_ineligible: u64,
    pub rejected_below_threshold: u64,
}
