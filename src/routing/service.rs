//! Frozen router, the request-handler entry point
//!
//! All middleware composition and path resolution happened at registration
//! time; dispatch is a table lookup plus a handler call. The service holds
//! no mutable state, so one instance serves any number of connection tasks
//! concurrently without locks.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request};

use crate::handler::HandlerFuture;
use crate::http::response::{build_404_response, build_405_response};
use crate::mux::{Lookup, Mux, PathParams};

/// Immutable route table, produced by [`super::Router::into_service`].
///
/// Cloning is an `Arc` bump; clones share the same table.
#[derive(Clone)]
pub struct RouterService {
    mux: Arc<Mux>,
}

impl RouterService {
    pub(crate) fn new(mux: Mux) -> Self {
        Self { mux: Arc::new(mux) }
    }

    /// Resolve and invoke the handler for a request.
    ///
    /// Delegates straight to the pattern matcher. An unmatched path yields
    /// 404; a path registered under other methods yields 405 with an
    /// `Allow` header naming them. Captured path parameters are attached to
    /// the request extensions before the handler runs (see
    /// [`crate::mux::RequestExt::param`]).
    pub fn dispatch(&self, mut req: Request<Full<Bytes>>) -> HandlerFuture {
        match self.mux.lookup(req.method(), req.uri().path()) {
            Lookup::Found { handler, params } => {
                if !params.is_empty() {
                    req.extensions_mut().insert::<PathParams>(params);
                }
                handler.call(req)
            }
            Lookup::MethodNotAllowed { allow } => {
                Box::pin(std::future::ready(build_405_response(&allow)))
            }
            Lookup::NotFound => Box::pin(std::future::ready(build_404_response())),
        }
    }

    /// Number of installed routes.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.mux.route_count()
    }

    /// Resolve a method + path without invoking the handler.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Lookup {
        self.mux.lookup(method, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mux::RequestExt;
    use crate::routing::Router;
    use http_body_util::BodyExt;
    use hyper::{Response, StatusCode};

    fn request(method: Method, path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_matched_route() {
        let router = Router::new();
        router.get("/hello", |_req: Request<Full<Bytes>>| async {
            Response::new(Full::new(Bytes::from("hi")))
        });

        let service = router.into_service();
        let resp = service.dispatch(request(Method::GET, "/hello")).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "hi");
    }

    #[tokio::test]
    async fn test_dispatch_passes_path_params() {
        let router = Router::new();
        router.get("/users/{id}", |req: Request<Full<Bytes>>| async move {
            let id = req.param("id").unwrap_or("none").to_string();
            Response::new(Full::new(Bytes::from(id)))
        });

        let service = router.into_service();
        let resp = service.dispatch(request(Method::GET, "/users/42")).await;

        assert_eq!(body_string(resp).await, "42");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_path_is_404() {
        let router = Router::new();
        router.get("/hello", |_req: Request<Full<Bytes>>| async {
            Response::new(Full::new(Bytes::new()))
        });

        let service = router.into_service();
        let resp = service.dispatch(request(Method::GET, "/missing")).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dispatch_wrong_method_is_405_with_allow() {
        let router = Router::new();
        router.get("/users", |_req: Request<Full<Bytes>>| async {
            Response::new(Full::new(Bytes::new()))
        });
        router.post("/users", |_req: Request<Full<Bytes>>| async {
            Response::new(Full::new(Bytes::new()))
        });

        let service = router.into_service();
        let resp = service.dispatch(request(Method::DELETE, "/users")).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get("Allow").and_then(|v| v.to_str().ok()),
            Some("GET, POST")
        );
    }

    #[tokio::test]
    async fn test_dispatch_empty_router_is_404() {
        let service = Router::new().into_service();
        let resp = service.dispatch(request(Method::GET, "/")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dispatch_head_uses_get_route() {
        let router = Router::new();
        router.get("/resource", |_req: Request<Full<Bytes>>| async {
            Response::new(Full::new(Bytes::from("payload")))
        });

        let service = router.into_service();
        let resp = service.dispatch(request(Method::HEAD, "/resource")).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
