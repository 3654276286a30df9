//! Error types for report-vault

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Duplicate report id: {0}")]
    DuplicateKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt report record: {0}")]
    CorruptRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
