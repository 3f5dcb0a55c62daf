//! Pattern matcher adapter
//!
//! The routing layer does not implement pattern matching. Segment matching
//! and path-parameter extraction are delegated to [`matchit`], consumed here
//! as an opaque "register pattern, look up path" service, one radix tree per
//! HTTP method. Placeholder segments use the matcher's `{name}` syntax.

mod params;

pub use params::{PathParams, RequestExt};

use std::collections::HashMap;

use hyper::Method;

use crate::handler::Handler;

/// Route table: one pattern matcher per HTTP method.
///
/// Mutable only during the setup phase; [`crate::routing::Router::into_service`]
/// freezes it for the serving phase. The table owns every installed handler;
/// scopes keep no reference to a route once it is registered.
#[derive(Default)]
pub struct Mux {
    tables: HashMap<Method, matchit::Router<Handler>>,
    routes: usize,
    frozen: bool,
}

/// Outcome of resolving a method + path against the route table.
pub enum Lookup {
    /// Exactly one route matched.
    Found {
        handler: Handler,
        params: PathParams,
    },
    /// The path is registered, but not for this method.
    MethodNotAllowed { allow: Vec<Method> },
    /// Nothing matches the path under any method.
    NotFound,
}

impl Mux {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler under a method + path pattern.
    ///
    /// # Panics
    ///
    /// Registering a pattern that duplicates or conflicts with an existing
    /// one is a programmer error, fatal at setup time. The matcher reports
    /// it and setup aborts; there is no silent overwrite. Registering after
    /// the table has been frozen is the same class of error.
    pub fn register(&mut self, method: Method, path: &str, handler: Handler) {
        assert!(
            !self.frozen,
            "route \"{method} {path}\" registered after the router was frozen"
        );

        let table = self
            .tables
            .entry(method.clone())
            .or_insert_with(matchit::Router::new);

        if let Err(err) = table.insert(path, handler) {
            panic!("route registration failed for pattern \"{method} {path}\": {err}");
        }
        self.routes += 1;
    }

    /// Resolve a request's method and path to a handler.
    ///
    /// A HEAD request with no HEAD route falls back to the GET table, the
    /// way the standard multiplexers treat HEAD.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Lookup {
        if let Some(found) = self.lookup_in(method, path) {
            return found;
        }
        if *method == Method::HEAD {
            if let Some(found) = self.lookup_in(&Method::GET, path) {
                return found;
            }
        }

        // Path may still exist under other methods; report which.
        let mut allow: Vec<Method> = self
            .tables
            .iter()
            .filter(|(m, table)| *m != method && table.at(path).is_ok())
            .map(|(m, _)| m.clone())
            .collect();

        if allow.is_empty() {
            Lookup::NotFound
        } else {
            allow.sort_by_key(ToString::to_string);
            Lookup::MethodNotAllowed { allow }
        }
    }

    fn lookup_in(&self, method: &Method, path: &str) -> Option<Lookup> {
        let table = self.tables.get(method)?;
        let matched = table.at(path).ok()?;
        Some(Lookup::Found {
            handler: matched.value.clone(),
            params: PathParams::from_matched(&matched.params),
        })
    }

    /// Number of installed routes.
    #[must_use]
    pub const fn route_count(&self) -> usize {
        self.routes
    }

    /// Forbid further registration.
    ///
    /// Called on the builder-side table left behind by the freeze, so that a
    /// stray scope registering after setup fails loudly instead of landing
    /// in a table nothing dispatches from.
    pub(crate) fn seal(&mut self) {
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::Response;

    fn noop() -> Handler {
        Handler::new(|_req| async { Response::new(Full::new(Bytes::new())) })
    }

    #[test]
    fn test_lookup_found() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());

        assert!(matches!(
            mux.lookup(&Method::GET, "/users"),
            Lookup::Found { .. }
        ));
        assert_eq!(mux.route_count(), 1);
    }

    #[test]
    fn test_lookup_captures_params() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users/{id}", noop());

        match mux.lookup(&Method::GET, "/users/42") {
            Lookup::Found { params, .. } => assert_eq!(params.get("id"), Some("42")),
            _ => panic!("expected a match for /users/42"),
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());

        assert!(matches!(
            mux.lookup(&Method::GET, "/orders"),
            Lookup::NotFound
        ));
    }

    #[test]
    fn test_lookup_method_not_allowed() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());
        mux.register(Method::POST, "/users", noop());

        match mux.lookup(&Method::DELETE, "/users") {
            Lookup::MethodNotAllowed { allow } => {
                assert_eq!(allow, vec![Method::GET, Method::POST]);
            }
            _ => panic!("expected method-not-allowed for DELETE /users"),
        }
    }

    #[test]
    fn test_head_falls_back_to_get() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());

        assert!(matches!(
            mux.lookup(&Method::HEAD, "/users"),
            Lookup::Found { .. }
        ));
    }

    #[test]
    fn test_head_route_wins_over_fallback() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());
        mux.register(Method::HEAD, "/users", noop());

        assert!(matches!(
            mux.lookup(&Method::HEAD, "/users"),
            Lookup::Found { .. }
        ));
        assert_eq!(mux.route_count(), 2);
    }

    #[test]
    #[should_panic(expected = "route registration failed")]
    fn test_duplicate_pattern_panics() {
        let mut mux = Mux::new();
        mux.register(Method::GET, "/users", noop());
        mux.register(Method::GET, "/users", noop());
    }

    #[test]
    #[should_panic(expected = "registered after the router was frozen")]
    fn test_register_after_seal_panics() {
        let mut mux = Mux::new();
        mux.seal();
        mux.register(Method::GET, "/users", noop());
    }
}
