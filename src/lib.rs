//! A fluent request-routing layer for hyper servers.
//!
//! Routes are registered against a tree of scopes: the [`Router`] at the
//! root, prefix [`routing::Group`]s nested under it, and per-path scopes for
//! stacking several methods on one path. Each scope carries a middleware
//! chain; a child scope snapshots its parent's chain at creation time, and
//! every registration composes the scope's chain around the handler once,
//! up front. Dispatch is a lookup in a radix tree (the [`matchit`] crate)
//! plus a single handler call: no per-request composition, no locks.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use http_body_util::Full;
//! use hyper::body::Bytes;
//! use hyper::{Request, Response, StatusCode};
//! use rust_router::http::json_response;
//! use rust_router::{middleware, Config, RequestExt, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     rust_router::logger::init(&config)?;
//!
//!     // Router with access logging on every route
//!     let router = Router::new().middleware(middleware::access_log("combined"));
//!
//!     // /api/v1 group
//!     let api_v1 = router.group("/api").group("/v1");
//!
//!     api_v1.get("/hello", hello);
//!
//!     // Several methods against one path
//!     let _ = api_v1
//!         .path("/users/{id}")
//!         .get(get_user)
//!         .patch(update_user)
//!         .delete(delete_user);
//!
//!     // Freeze the route table and serve
//!     rust_router::serve(&config, router.into_service()).await
//! }
//!
//! async fn hello(_req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
//!     json_response(StatusCode::OK, &serde_json::json!({ "message": "hello" }))
//! }
//!
//! async fn get_user(req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
//!     let id = req.param("id").unwrap_or("unknown").to_string();
//!     json_response(StatusCode::OK, &serde_json::json!({ "id": id }))
//! }
//!
//! async fn update_user(req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
//!     let id = req.param("id").unwrap_or("unknown").to_string();
//!     json_response(StatusCode::OK, &serde_json::json!({ "id": id, "updated": true }))
//! }
//!
//! async fn delete_user(req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
//!     let id = req.param("id").unwrap_or("unknown").to_string();
//!     json_response(StatusCode::OK, &serde_json::json!({ "id": id, "deleted": true }))
//! }
//! ```
//!
//! # Setup and serving phases
//!
//! Registration runs single-threaded during application setup; calling
//! [`Router::into_service`] consumes the builder and freezes the route
//! table. The resulting [`RouterService`] is immutable and safe to share
//! across any number of connection tasks.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod middleware;
pub mod mux;
pub mod routing;
pub mod server;

// Re-exports for the common path
pub use config::Config;
pub use handler::{Handler, HandlerFuture, RemoteAddr};
pub use mux::{Mux, PathParams, RequestExt};
pub use routing::{Middleware, Router, RouterService};
pub use server::serve;
