//! HTTP response building module
//!
//! Builders for the responses the routing layer produces itself (404, 405)
//! and the ones the serving glue needs (400, 413), plus a JSON helper for
//! application handlers. Decoupled from routing logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
///
/// The `Allow` header lists the methods actually registered for the path.
pub fn build_405_response(allow: &[Method]) -> Response<Full<Bytes>> {
    let allowed = allow
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", allowed)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response(message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(format!("400 Bad Request: {message}"))))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("400 Bad Request")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build a JSON response from any serializable value
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response(&[Method::GET, Method::POST]);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get("Allow").and_then(|v| v.to_str().ok()),
            Some("GET, POST")
        );
    }

    #[test]
    fn test_400_includes_message() {
        let resp = build_400_response("invalid request body");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_response_serializes_body() {
        let resp = json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "hello", "count": 3 }),
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message"], "hello");
        assert_eq!(value["count"], 3);
    }
}
