//! Route registration scopes
//!
//! Three granularities of the same idea: a [`Router`] is the root scope, a
//! [`Group`] narrows it under a path prefix, and a [`PathScope`] narrows it
//! to one fully-resolved path. Every scope carries a middleware chain; a
//! child scope starts from a snapshot of its parent's chain taken at
//! creation time, so middleware added to the parent afterwards never leak
//! into the child.
//!
//! Registration is where all the work happens: the scope's chain is composed
//! around the handler once, and the wrapped result is installed into the
//! route table. Dispatch does nothing but look the result up.

use std::sync::{Arc, Mutex};

use hyper::Method;

use super::chain::{compose, Middleware};
use super::path::{clean, join};
use super::service::RouterService;
use crate::handler::Handler;
use crate::mux::Mux;

/// Root registration scope. Owns the route table.
///
/// Building and registering happen on one thread during application setup;
/// [`Router::into_service`] then freezes the table into an immutable
/// [`RouterService`] for the serving phase. Scopes hold no state a request
/// ever touches and are typically dropped once registration completes.
pub struct Router {
    mux: Arc<Mutex<Mux>>,
    chain: Vec<Middleware>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mux: Arc::new(Mutex::new(Mux::new())),
            chain: Vec::new(),
        }
    }

    /// Append a middleware to this router's chain.
    ///
    /// Order is significant: the first appended middleware becomes the
    /// outermost wrapper of every route registered through this scope.
    /// Groups already created from this router keep their snapshot and are
    /// not affected.
    #[must_use]
    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.chain.push(mw);
        self
    }

    /// Create a child scope under a path prefix.
    ///
    /// The child copies this router's current middleware chain by value.
    pub fn group(&self, prefix: &str) -> Group {
        Group {
            mux: Arc::clone(&self.mux),
            prefix: clean(prefix),
            chain: self.chain.clone(),
        }
    }

    /// Create a scope bound to one fully-resolved path, for registering
    /// several methods against it without repeating the path string.
    pub fn path(&self, path: &str) -> PathScope {
        PathScope {
            mux: Arc::clone(&self.mux),
            path: clean(path),
            chain: self.chain.clone(),
        }
    }

    /// Freeze the route table and hand it to the serving phase.
    ///
    /// Consumes the builder: no registration surface survives the freeze.
    /// Any group or path scope kept alive past this point panics on its
    /// next registration.
    #[must_use]
    pub fn into_service(self) -> RouterService {
        let mut table = self.mux.lock().unwrap();
        let mux = std::mem::take(&mut *table);
        table.seal();
        RouterService::new(mux)
    }

    fn register(&self, method: Method, path: &str, handler: Handler) {
        install(&self.mux, &self.chain, method, clean(path), handler);
    }

    pub fn get(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::GET, path, handler.into());
    }

    pub fn post(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::POST, path, handler.into());
    }

    pub fn put(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::PUT, path, handler.into());
    }

    pub fn patch(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::PATCH, path, handler.into());
    }

    pub fn delete(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::DELETE, path, handler.into());
    }

    pub fn head(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::HEAD, path, handler.into());
    }

    pub fn options(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::OPTIONS, path, handler.into());
    }

    pub fn connect(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::CONNECT, path, handler.into());
    }

    pub fn trace(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::TRACE, path, handler.into());
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// A registration scope under a path prefix.
///
/// Created by [`Router::group`] or nested via [`Group::group`]. The
/// effective prefix is the concatenation of all ancestor prefixes; the
/// middleware chain starts as a snapshot of the parent's chain.
pub struct Group {
    mux: Arc<Mutex<Mux>>,
    prefix: String,
    chain: Vec<Middleware>,
}

impl Group {
    /// Append a middleware to this group's own chain.
    #[must_use]
    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.chain.push(mw);
        self
    }

    /// Create a nested child scope; prefixes join, chain is snapshot-copied.
    pub fn group(&self, prefix: &str) -> Self {
        Self {
            mux: Arc::clone(&self.mux),
            prefix: join(&self.prefix, prefix),
            chain: self.chain.clone(),
        }
    }

    /// Create a scope bound to one path under this group's prefix.
    pub fn path(&self, path: &str) -> PathScope {
        PathScope {
            mux: Arc::clone(&self.mux),
            path: join(&self.prefix, path),
            chain: self.chain.clone(),
        }
    }

    fn register(&self, method: Method, path: &str, handler: Handler) {
        install(
            &self.mux,
            &self.chain,
            method,
            join(&self.prefix, path),
            handler,
        );
    }

    pub fn get(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::GET, path, handler.into());
    }

    pub fn post(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::POST, path, handler.into());
    }

    pub fn put(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::PUT, path, handler.into());
    }

    pub fn patch(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::PATCH, path, handler.into());
    }

    pub fn delete(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::DELETE, path, handler.into());
    }

    pub fn head(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::HEAD, path, handler.into());
    }

    pub fn options(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::OPTIONS, path, handler.into());
    }

    pub fn connect(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::CONNECT, path, handler.into());
    }

    pub fn trace(&self, path: &str, handler: impl Into<Handler>) {
        self.register(Method::TRACE, path, handler.into());
    }
}

/// A registration scope bound to one fully-resolved path.
///
/// Registration methods take no path and return the scope, so several
/// methods chain against the identical path:
///
/// ```ignore
/// router.path("/users/{id}")
///     .get(show_user)
///     .patch(update_user)
///     .delete(delete_user);
/// ```
pub struct PathScope {
    mux: Arc<Mutex<Mux>>,
    path: String,
    chain: Vec<Middleware>,
}

impl PathScope {
    fn register(&self, method: Method, handler: Handler) {
        install(&self.mux, &self.chain, method, self.path.clone(), handler);
    }

    #[must_use]
    pub fn get(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::GET, handler.into());
        self
    }

    #[must_use]
    pub fn post(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::POST, handler.into());
        self
    }

    #[must_use]
    pub fn put(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::PUT, handler.into());
        self
    }

    #[must_use]
    pub fn patch(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::PATCH, handler.into());
        self
    }

    #[must_use]
    pub fn delete(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::DELETE, handler.into());
        self
    }

    #[must_use]
    pub fn head(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::HEAD, handler.into());
        self
    }

    #[must_use]
    pub fn options(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::OPTIONS, handler.into());
        self
    }

    #[must_use]
    pub fn connect(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::CONNECT, handler.into());
        self
    }

    #[must_use]
    pub fn trace(self, handler: impl Into<Handler>) -> Self {
        self.register(Method::TRACE, handler.into());
        self
    }
}

/// Compose the scope's chain around the handler and install the result.
///
/// The one place registration flows through: by the time the route table
/// sees a handler it is already fully wrapped, so a registration either
/// succeeds with its complete chain or panics. There is no partially
/// wrapped route.
fn install(
    mux: &Arc<Mutex<Mux>>,
    chain: &[Middleware],
    method: Method,
    path: String,
    handler: Handler,
) {
    let wrapped = compose(chain, handler);
    mux.lock().unwrap().register(method, &path, wrapped);
}
