//! Report record operations

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, Row};
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;

/// Full report row from the database
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub id: String,
    /// Serialized document text, opaque at this layer
    pub data: String,
    pub created_at: String,
}

impl ReportRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            data: row.get("data")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Listing entry: identifier and creation time only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: String,
    pub created_at: String,
}

/// Timestamp format stored in `created_at`
///
/// Millisecond precision so back-to-back inserts stay ordered; lexicographic
/// order of the rendered string matches chronological order.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Insert a new report record, stamping `created_at`
///
/// An existing id is a hard `DuplicateKey` error, never an overwrite.
pub fn insert_report(conn: &Connection, id: &str, data: &str) -> Result<(), ReportError> {
    let created_at = Utc::now().format(CREATED_AT_FORMAT).to_string();

    debug!(id = %id, size = data.len(), "Inserting report");

    conn.execute(
        "INSERT INTO reports (id, data, created_at) VALUES (?, ?, ?)",
        params![id, data, created_at],
    )
    .map_err(|e| {
        if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            ReportError::DuplicateKey(id.to_string())
        } else {
            ReportError::Unavailable(format!("Insert failed: {}", e))
        }
    })?;

    Ok(())
}

/// Get a report by id, `None` if absent
pub fn get_report(conn: &Connection, id: &str) -> Result<Option<ReportRow>, ReportError> {
    let mut stmt = conn
        .prepare("SELECT id, data, created_at FROM reports WHERE id = ?")
        .map_err(|e| ReportError::Unavailable(format!("Prepare failed: {}", e)))?;

    let mut rows = stmt
        .query(params![id])
        .map_err(|e| ReportError::Unavailable(format!("Query failed: {}", e)))?;

    match rows.next().map_err(|e| ReportError::Unavailable(format!("Row fetch failed: {}", e)))? {
        Some(row) => {
            let report = ReportRow::from_row(row)
                .map_err(|e| ReportError::Unavailable(format!("Row parse failed: {}", e)))?;
            Ok(Some(report))
        }
        None => Ok(None),
    }
}

/// List all reports newest-first
///
/// rowid breaks ties between same-millisecond inserts.
pub fn list_reports(conn: &Connection) -> Result<Vec<ReportSummary>, ReportError> {
    let mut stmt = conn
        .prepare("SELECT id, created_at FROM reports ORDER BY created_at DESC, rowid DESC")
        .map_err(|e| ReportError::Unavailable(format!("Prepare failed: {}", e)))?;

    let summaries: Vec<ReportSummary> = stmt
        .query_map([], |row| {
            Ok(ReportSummary {
                id: row.get(0)?,
                created_at: row.get(1)?,
            })
        })
        .map_err(|e| ReportError::Unavailable(format!("Query failed: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ReportError::Unavailable(format!("Row parse failed: {}", e)))?;

    Ok(summaries)
}

/// Count stored reports
pub fn count_reports(conn: &Connection) -> Result<i64, ReportError> {
    conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))
        .map_err(|e| ReportError::Unavailable(format!("Count query failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
        schema::init_schema(&conn).expect("Failed to init schema");
        conn
    }

    #[test]
    fn test_insert_and_get() {
        let conn = setup_test_db();

        insert_report(&conn, "r1", r#"{"severity":"high"}"#).unwrap();

        let row = get_report(&conn, "r1").unwrap().expect("report should exist");
        assert_eq!(row.id, "r1");
        assert_eq!(row.data, r#"{"severity":"high"}"#);
        assert!(!row.created_at.is_empty());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let conn = setup_test_db();
        assert!(get_report(&conn, "does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let conn = setup_test_db();

        insert_report(&conn, "r1", r#"{"first":true}"#).unwrap();
        let err = insert_report(&conn, "r1", r#"{"second":true}"#).unwrap_err();

        assert!(matches!(err, ReportError::DuplicateKey(ref id) if id == "r1"));

        // First record untouched
        let row = get_report(&conn, "r1").unwrap().unwrap();
        assert_eq!(row.data, r#"{"first":true}"#);
    }

    #[test]
    fn test_list_newest_first() {
        let conn = setup_test_db();

        insert_report(&conn, "a", "{}").unwrap();
        insert_report(&conn, "b", "{}").unwrap();
        insert_report(&conn, "c", "{}").unwrap();

        let listed = list_reports(&conn).unwrap();
        assert_eq!(listed.len(), 3);

        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        // created_at non-increasing in sequence order
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_count() {
        let conn = setup_test_db();
        assert_eq!(count_reports(&conn).unwrap(), 0);

        insert_report(&conn, "a", "{}").unwrap();
        insert_report(&conn, "b", "{}").unwrap();
        assert_eq!(count_reports(&conn).unwrap(), 2);
    }
}
