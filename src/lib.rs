//! Report Vault - create-and-share service for security assessment reports
//!
//! A user fills a form describing a security assessment; the resulting JSON
//! document is persisted under a generated identifier and served back
//! read-only at a shareable URL.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Façade (http.rs)
//!     ↓
//! Report Service (services/report_service.rs)
//!     ↓                         ↘
//! Report Store (db/)        Identifier Generator (id.rs)
//!     ↓
//! SQLite Database
//! ```
//!
//! The store holds the document as opaque serialized text; the service owns
//! (de)serialization; the façade owns status codes and the `{success, ...}`
//! response envelope. Rendering of reports and the editing UI live in a
//! separate frontend, served only as static assets here.

pub mod assets;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod id;
pub mod services;

// Re-exports
pub use config::Config;
pub use db::ReportDb;
pub use error::ReportError;
pub use http::HttpServer;
pub use services::ReportService;
