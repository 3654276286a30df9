//! Service layer for report-vault
//!
//! ```text
//! HTTP Handlers (thin)
//!     ↓
//! Report Service (id generation, (de)serialization, result shaping)
//!     ↓
//! Report Store (db/)
//!     ↓
//! SQLite Database
//! ```

pub mod report_service;
pub mod response;

pub use report_service::{CreatedReport, ReportListing, ReportService, ReportView};
