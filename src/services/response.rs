//! HTTP response building helpers
//!
//! Every API response is the uniform `{success, ...}` envelope; failure
//! bodies carry only a generic message, never internal detail.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde::Serialize;

/// Build a JSON response with the given status code
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}

/// Build a JSON response with 200 OK status
pub fn ok<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, body)
}

/// Build a JSON response with 201 Created status
pub fn created<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    json_response(StatusCode::CREATED, body)
}

/// Build a 404 Not Found failure envelope
pub fn not_found(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "success": false, "error": message }),
    )
}

/// Build a 400 Bad Request failure envelope
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &serde_json::json!({ "success": false, "error": message }),
    )
}

/// Build a 405 Method Not Allowed failure envelope
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({ "success": false, "error": "Method not allowed" }),
    )
}

/// Build a 500 Internal Server Error failure envelope
pub fn internal_error(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &serde_json::json!({ "success": false, "error": message }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        use http_body_util::BodyExt;
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let bytes = rt.block_on(async move {
            resp.into_body().collect().await.unwrap().to_bytes()
        });
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_ok_response() {
        let resp = ok(&serde_json::json!({"success": true}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_not_found_envelope() {
        let resp = not_found("Report not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Report not found");
    }

    #[test]
    fn test_internal_error_envelope() {
        let resp = internal_error("Failed to create report");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp);
        assert_eq!(body["success"], false);
    }
}
