//! HTTP API for the report service
//!
//! ## Report API
//! - `POST /api/reports` - Create a report from an arbitrary JSON document
//! - `GET /api/reports/{id}` - Fetch a stored report
//! - `GET /api/reports` - List reports, newest first (administrative)
//! - `GET /health` - Health check
//!
//! Any other GET falls through to static asset serving.
//!
//! ## Example Usage
//!
//! ```bash
//! # Create a report
//! curl -X POST -H "Content-Type: application/json" \
//!      -d '{"riskLevel":"Alto","companyName":"Acme"}' \
//!      http://localhost:3001/api/reports
//!
//! # Fetch it back
//! curl http://localhost:3001/api/reports/{id}
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::assets;
use crate::error::ReportError;
use crate::services::{response, ReportService};

/// HTTP server state
pub struct HttpServer {
    service: Arc<ReportService>,
    static_dir: PathBuf,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl HttpServer {
    /// Bind the listener; the port is held from here until drop
    pub async fn bind(
        addr: SocketAddr,
        service: Arc<ReportService>,
        static_dir: PathBuf,
    ) -> Result<Self, ReportError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            service,
            static_dir,
            listener,
            local_addr,
        })
    }

    /// The bound address (resolves port 0 binds)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Run the HTTP server
    pub async fn run(self: Arc<Self>) -> Result<(), ReportError> {
        info!(addr = %self.local_addr, "HTTP server listening");

        loop {
            let (stream, remote_addr) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let server = self.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let server = server.clone();
                    async move { server.handle_request(req).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    warn!(addr = %remote_addr, error = %err, "Connection error");
                }
            });
        }
    }

    /// Route requests to handlers
    async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        debug!(method = %method, path = %path, "Incoming request");

        let result = match (method, path.as_str()) {
            // CORS preflight
            (Method::OPTIONS, _) => Ok(preflight_response()),

            // Health check
            (Method::GET, "/health") => self.handle_health(),

            // Report API
            (Method::POST, "/api/reports") => self.handle_create(req).await,
            (Method::GET, "/api/reports") => self.handle_list(),
            (Method::GET, p) if p.starts_with("/api/reports/") => {
                let id = p.strip_prefix("/api/reports/").unwrap_or("");
                self.handle_fetch(id)
            }

            // Wrong method on a known route
            (_, "/api/reports") => Ok(response::method_not_allowed()),
            (_, p) if p.starts_with("/api/reports/") => Ok(response::method_not_allowed()),

            // Unknown API path
            (_, p) if p.starts_with("/api/") => Ok(response::not_found("Not found")),

            // Everything else: static fallthrough (report viewer frontend)
            (Method::GET, _) => Ok(assets::serve(&self.static_dir, &path).await),

            _ => Ok(response::not_found("Not found")),
        };

        let mut response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Request error");
                response::internal_error("Internal server error")
            }
        };

        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );

        Ok(response)
    }

    /// Health check endpoint
    fn handle_health(&self) -> Result<Response<Full<Bytes>>, ReportError> {
        let stats = self.service.stats()?;
        let body = serde_json::json!({
            "status": "ok",
            "reports": stats.report_count,
        });

        Ok(response::ok(&body))
    }

    /// POST /api/reports - Create a report
    async fn handle_create(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, ReportError> {
        let base_url = self.base_url(&req);

        let body = req
            .collect()
            .await
            .map_err(|e| ReportError::Internal(format!("Failed to read body: {}", e)))?;
        let data = body.to_bytes();

        let document: Value = match serde_json::from_slice(&data) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Rejected non-JSON report body");
                return Ok(response::bad_request("Invalid JSON body"));
            }
        };

        match self.service.create(&document, &base_url) {
            Ok(created) => {
                info!(id = %created.report_id, "Stored report");

                Ok(response::created(&serde_json::json!({
                    "success": true,
                    "reportId": created.report_id,
                    "reportUrl": created.report_url,
                })))
            }
            Err(e) => {
                error!(error = %e, "Error creating report");
                Ok(response::internal_error("Failed to create report"))
            }
        }
    }

    /// GET /api/reports/{id} - Fetch a report
    fn handle_fetch(&self, id: &str) -> Result<Response<Full<Bytes>>, ReportError> {
        if id.is_empty() {
            return Ok(response::not_found("Report not found"));
        }

        match self.service.fetch(id) {
            Ok(Some(report)) => Ok(response::ok(&serde_json::json!({
                "success": true,
                "report": report,
            }))),
            Ok(None) => Ok(response::not_found("Report not found")),
            Err(e) => {
                error!(error = %e, id = %id, "Error fetching report");
                Ok(response::internal_error("Failed to fetch report"))
            }
        }
    }

    /// GET /api/reports - List reports newest-first
    fn handle_list(&self) -> Result<Response<Full<Bytes>>, ReportError> {
        match self.service.list() {
            Ok(listing) => Ok(response::ok(&serde_json::json!({
                "success": true,
                "count": listing.count,
                "reports": listing.reports,
            }))),
            Err(e) => {
                error!(error = %e, "Error listing reports");
                Ok(response::internal_error("Failed to list reports"))
            }
        }
    }

    /// Scheme+host for retrieval URLs, from the request's Host header
    fn base_url(&self, req: &Request<Incoming>) -> String {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(|h| h.to_string())
            .unwrap_or_else(|| self.local_addr.to_string());

        format!("http://{}", host)
    }
}

/// CORS preflight response; the allow-origin header is added by the router
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_shape() {
        let resp = preflight_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "GET, POST, OPTIONS"
        );
    }
}
