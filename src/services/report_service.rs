//! Report service - create/fetch semantics over the store
//!
//! The service owns document (de)serialization. The store below sees only
//! opaque text; the façade above sees only shaped results.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::db::{reports, ReportDb};
use crate::error::ReportError;
use crate::id;

/// Report service for create/fetch orchestration
pub struct ReportService {
    db: Arc<ReportDb>,
}

/// Result of creating a report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReport {
    pub report_id: String,
    pub report_url: String,
}

/// A fetched report with its metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub id: String,
    pub data: Value,
    pub created_at: String,
}

/// Administrative listing of stored reports
#[derive(Debug, Clone, Serialize)]
pub struct ReportListing {
    pub count: usize,
    pub reports: Vec<reports::ReportSummary>,
}

impl ReportService {
    /// Create a new report service over an opened store
    pub fn new(db: Arc<ReportDb>) -> Self {
        Self { db }
    }

    /// Create a report: generate an id, persist the document, shape the result
    ///
    /// `base_url` is scheme+host of the current request; the retrieval URL is
    /// `{base_url}/report/{id}`.
    pub fn create(&self, document: &Value, base_url: &str) -> Result<CreatedReport, ReportError> {
        let report_id = id::generate();
        let data = serde_json::to_string(document)?;

        self.db
            .with_conn(|conn| reports::insert_report(conn, &report_id, &data))?;

        debug!(id = %report_id, size = data.len(), "Report created");

        let report_url = format!("{}/report/{}", base_url.trim_end_matches('/'), report_id);

        Ok(CreatedReport {
            report_id,
            report_url,
        })
    }

    /// Fetch a report by id
    ///
    /// `None` when no record exists. A record whose stored text fails to
    /// deserialize is `CorruptRecord`, not absence.
    pub fn fetch(&self, report_id: &str) -> Result<Option<ReportView>, ReportError> {
        let row = self
            .db
            .with_conn(|conn| reports::get_report(conn, report_id))?;

        match row {
            Some(row) => {
                let data: Value = serde_json::from_str(&row.data).map_err(|e| {
                    ReportError::CorruptRecord(format!("report {}: {}", row.id, e))
                })?;

                Ok(Some(ReportView {
                    id: row.id,
                    data,
                    created_at: row.created_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// List stored reports, newest first
    pub fn list(&self) -> Result<ReportListing, ReportError> {
        let reports = self.db.with_conn(reports::list_reports)?;

        Ok(ReportListing {
            count: reports.len(),
            reports,
        })
    }

    /// Store statistics for the health probe
    pub fn stats(&self) -> Result<crate::db::DbStats, ReportError> {
        self.db.stats()
    }
}
