//! SQLite database module for report storage
//!
//! One table, one concern: a durable id → serialized-document mapping with
//! an insertion timestamp. The document body is opaque text at this layer;
//! serialization belongs to the service above.

pub mod reports;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::ReportError;

/// SQLite database for report records
pub struct ReportDb {
    conn: Mutex<Connection>,
}

impl ReportDb {
    /// Open or create the report database
    pub fn open(db_path: &Path) -> Result<Self, ReportError> {
        info!("Opening SQLite database at {:?}", db_path);

        let conn = Connection::open(db_path)
            .map_err(|e| ReportError::Unavailable(format!("Failed to open SQLite: {}", e)))?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| ReportError::Unavailable(format!("Failed to set PRAGMA: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.init_schema()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, ReportError> {
        debug!("Opening in-memory SQLite database");

        let conn = Connection::open_in_memory()
            .map_err(|e| ReportError::Unavailable(format!("Failed to open in-memory SQLite: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.init_schema()?;

        Ok(db)
    }

    /// Initialize database schema (safe against a pre-existing store)
    fn init_schema(&self) -> Result<(), ReportError> {
        let conn = self.conn.lock()
            .map_err(|e| ReportError::Internal(format!("Lock poisoned: {}", e)))?;

        schema::init_schema(&conn)?;

        Ok(())
    }

    /// Run an operation against the connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ReportError>
    where
        F: FnOnce(&Connection) -> Result<T, ReportError>,
    {
        let conn = self.conn.lock()
            .map_err(|e| ReportError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats, ReportError> {
        self.with_conn(|conn| {
            let report_count = reports::count_reports(conn)?;
            Ok(DbStats {
                report_count: report_count as u64,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub report_count: u64,
}

// Re-exports
pub use reports::{ReportRow, ReportSummary};
