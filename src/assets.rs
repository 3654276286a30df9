//! Static asset fallthrough
//!
//! Non-API paths are served from the configured asset directory with an
//! `index.html` single-page-app fallback, mirroring how the report viewer
//! frontend is deployed. Presentation itself lives outside this crate.

use std::path::Path;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};

use crate::services::response;

/// Serve a file under `static_dir` for the given URI path
pub async fn serve(static_dir: &Path, uri_path: &str) -> Response<Full<Bytes>> {
    // Reject traversal outright
    if uri_path.contains("..") {
        return response::not_found("Not found");
    }

    let rel = uri_path.trim_start_matches('/');
    let candidate = if rel.is_empty() {
        static_dir.join("index.html")
    } else {
        static_dir.join(rel)
    };

    if let Some(body) = read_file(&candidate).await {
        return file_response(&candidate, body);
    }

    // SPA fallback: unknown paths (e.g. /report/{id}) get index.html
    let index = static_dir.join("index.html");
    match read_file(&index).await {
        Some(body) => file_response(&index, body),
        None => response::not_found("Not found"),
    }
}

async fn read_file(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => tokio::fs::read(path).await.ok(),
        _ => None,
    }
}

fn file_response(path: &Path, body: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(path))
        .header(header::CONTENT_LENGTH, body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_dist() -> TempDir {
        let temp = TempDir::new().unwrap();
        tokio::fs::write(temp.path().join("index.html"), "<html>app</html>")
            .await
            .unwrap();
        tokio::fs::write(temp.path().join("app.js"), "console.log(1)")
            .await
            .unwrap();
        temp
    }

    #[tokio::test]
    async fn test_serves_index_at_root() {
        let dist = setup_dist().await;
        let resp = serve(dist.path(), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_serves_named_file() {
        let dist = setup_dist().await;
        let resp = serve(dist.path(), "/app.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/javascript"
        );
    }

    #[tokio::test]
    async fn test_spa_fallback_for_unknown_path() {
        let dist = setup_dist().await;
        let resp = serve(dist.path(), "/report/some-id").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dist = setup_dist().await;
        let resp = serve(dist.path(), "/../secret").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_dir_is_not_found() {
        let temp = TempDir::new().unwrap();
        let resp = serve(&temp.path().join("nope"), "/anything").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
