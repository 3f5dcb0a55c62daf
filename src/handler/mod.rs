//! Request handler types
//!
//! Defines the handler callable the routing layer wraps and installs.
//! The routing layer treats handlers as black boxes: it composes middleware
//! around them at registration time and invokes the result at dispatch time,
//! never inspecting their behavior.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};

/// Boxed future returned by a handler invocation.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response<Full<Bytes>>> + Send + 'static>>;

/// A request handler: an opaque async callable from request to response.
///
/// Handlers are reference-counted so that a single registration can be
/// cloned into middleware closures and the route table without copying the
/// underlying function. Cloning a `Handler` is an `Arc` bump.
#[derive(Clone)]
pub struct Handler {
    func: Arc<dyn Fn(Request<Full<Bytes>>) -> HandlerFuture + Send + Sync>,
}

impl Handler {
    /// Wrap an async function or closure as a `Handler`.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request<Full<Bytes>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
    {
        Self {
            func: Arc::new(move |req| Box::pin(f(req))),
        }
    }

    /// Invoke the handler for one request.
    pub fn call(&self, req: Request<Full<Bytes>>) -> HandlerFuture {
        (self.func)(req)
    }

    /// Whether two handles point at the same underlying callable.
    ///
    /// Composition with an empty middleware chain must return the target
    /// handler unchanged; this is how that identity is observable.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.func, &b.func)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler")
    }
}

impl<F, Fut> From<F> for Handler
where
    F: Fn(Request<Full<Bytes>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// Peer address of the connection a request arrived on.
///
/// The serving layer inserts this into request extensions before dispatch;
/// middleware such as access logging read it back out. Absent when a request
/// is dispatched directly (tests, in-process calls).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    fn request() -> Request<Full<Bytes>> {
        Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_handler_from_async_fn() {
        async fn ok(_req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
            Response::new(Full::new(Bytes::from("hello")))
        }

        let handler = Handler::from(ok);
        let resp = handler.call(request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_handler_from_closure() {
        let handler = Handler::new(|_req| async {
            Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Full::new(Bytes::new()))
                .unwrap()
        });
        let resp = handler.call(request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_clone_preserves_identity() {
        let handler = Handler::new(|_req| async { Response::new(Full::new(Bytes::new())) });
        let clone = handler.clone();
        assert!(Handler::ptr_eq(&handler, &clone));
    }
}
