//! Route registration and dispatch
//!
//! The scope model (router, prefix groups, per-path scopes), middleware
//! chain composition, path normalization, and the frozen dispatch service.
//! Pattern matching itself lives behind the [`crate::mux`] adapter.

pub mod chain;
pub mod path;
pub mod router;
pub mod service;

// Re-export the registration surface
pub use chain::{compose, Middleware};
pub use path::{clean, join};
pub use router::{Group, PathScope, Router};
pub use service::RouterService;
