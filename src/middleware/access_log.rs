//! Access logging middleware
//!
//! Records one log line per request with method, path, status, response
//! size, and processing time, in any format `AccessLogEntry` supports.

use std::time::Instant;

use hyper::body::Body as _;
use hyper::{Request, Version};

use crate::handler::{Handler, RemoteAddr};
use crate::logger::{self, AccessLogEntry};
use crate::routing::Middleware;

/// Build an access-log middleware.
///
/// `format` is an `AccessLogEntry` format name (`combined`, `common`,
/// `json`) or a custom `$variable` pattern. The client address is read from
/// the [`RemoteAddr`] extension when the serving layer attached one, `-`
/// otherwise.
pub fn access_log(format: impl Into<String>) -> Middleware {
    let format = format.into();

    Middleware::new(move |next| {
        let format = format.clone();
        Handler::new(move |req| {
            let format = format.clone();
            let next = next.clone();
            async move {
                let started = Instant::now();

                let remote_addr = req
                    .extensions()
                    .get::<RemoteAddr>()
                    .map_or_else(|| "-".to_string(), |addr| addr.0.to_string());
                let method = req.method().to_string();
                let path = req.uri().path().to_string();
                let query = req.uri().query().map(ToString::to_string);
                let http_version = version_label(req.version());
                let referer = header_value(&req, "referer");
                let user_agent = header_value(&req, "user-agent");

                let response = next.call(req).await;

                let mut entry = AccessLogEntry::new(remote_addr, method, path);
                entry.query = query;
                entry.http_version = http_version;
                entry.status = response.status().as_u16();
                entry.body_bytes = response
                    .body()
                    .size_hint()
                    .exact()
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0);
                entry.referer = referer;
                entry.user_agent = user_agent;
                entry.request_time_us =
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

                logger::log_access(&entry, &format);
                response
            }
        })
    })
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::{Response, StatusCode};

    #[tokio::test]
    async fn test_response_passes_through_unchanged() {
        let handler = Handler::new(|_req| async {
            Response::builder()
                .status(StatusCode::CREATED)
                .body(Full::new(Bytes::from("created")))
                .unwrap()
        });

        let wrapped = access_log("combined").wrap(handler);
        let req = Request::builder()
            .method(hyper::Method::POST)
            .uri("/things?debug=1")
            .header("user-agent", "test-agent")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let resp = wrapped.call(req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_version_labels() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
