//! Middleware chain composition
//!
//! A middleware is a transformation from handler to handler. Chains are
//! composed once, at registration time: the scope's accumulated middleware
//! wrap the route handler into a single `Handler` that is installed into the
//! route table. Nothing here runs per request beyond the wrappers themselves.

use std::sync::Arc;

use crate::handler::Handler;

/// A wrapping behavior applied around a handler.
///
/// Middleware observe the request on the way in and the response on the way
/// out of whatever they wrap. Like [`Handler`], a `Middleware` is
/// reference-counted and cheap to clone, which is what makes chain snapshots
/// (see [`super::Router::group`]) copies of the list, not of the behaviors.
#[derive(Clone)]
pub struct Middleware {
    wrap: Arc<dyn Fn(Handler) -> Handler + Send + Sync>,
}

impl Middleware {
    /// Create a middleware from a handler transformation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self { wrap: Arc::new(f) }
    }

    /// Wrap a handler, producing the combined handler.
    #[must_use]
    pub fn wrap(&self, next: Handler) -> Handler {
        (self.wrap)(next)
    }
}

impl std::fmt::Debug for Middleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Middleware")
    }
}

/// Compose an ordered middleware chain around a target handler.
///
/// The first middleware in the chain is the outermost wrapper: it sees the
/// request first and the response last. An empty chain returns the target
/// handler unchanged. Composition is pure and cannot fail.
#[must_use]
pub fn compose(chain: &[Middleware], target: Handler) -> Handler {
    chain.iter().rev().fold(target, |next, mw| mw.wrap(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::{Request, Response};
    use std::sync::Mutex;

    type EventLog = Arc<Mutex<Vec<String>>>;

    /// Middleware that records "<label>-in" before and "<label>-out" after
    /// the wrapped handler runs.
    fn tagged(label: &'static str, log: &EventLog) -> Middleware {
        let log = Arc::clone(log);
        Middleware::new(move |next| {
            let log = Arc::clone(&log);
            Handler::new(move |req| {
                let log = Arc::clone(&log);
                let next = next.clone();
                async move {
                    log.lock().unwrap().push(format!("{label}-in"));
                    let resp = next.call(req).await;
                    log.lock().unwrap().push(format!("{label}-out"));
                    resp
                }
            })
        })
    }

    fn recording_handler(log: &EventLog) -> Handler {
        let log = Arc::clone(log);
        Handler::new(move |_req| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("handler".to_string());
                Response::new(Full::new(Bytes::new()))
            }
        })
    }

    fn request() -> Request<Full<Bytes>> {
        Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_middleware_is_outermost() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![tagged("A", &log), tagged("B", &log)];

        let composed = compose(&chain, recording_handler(&log));
        composed.call(request()).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["A-in", "B-in", "handler", "B-out", "A-out"]
        );
    }

    #[tokio::test]
    async fn test_single_middleware() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![tagged("A", &log)];

        let composed = compose(&chain, recording_handler(&log));
        composed.call(request()).await;

        assert_eq!(*log.lock().unwrap(), vec!["A-in", "handler", "A-out"]);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let handler = Handler::new(|_req| async { Response::new(Full::new(Bytes::new())) });
        let composed = compose(&[], handler.clone());
        assert!(Handler::ptr_eq(&handler, &composed));
    }

    #[tokio::test]
    async fn test_composed_handler_is_reusable() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![tagged("A", &log)];
        let composed = compose(&chain, recording_handler(&log));

        composed.call(request()).await;
        composed.call(request()).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["A-in", "handler", "A-out", "A-in", "handler", "A-out"]
        );
    }
}
