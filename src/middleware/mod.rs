//! Built-in middleware
//!
//! Ordinary [`crate::routing::Middleware`] values with no special standing;
//! applications append them to a scope's chain like any middleware of their
//! own.

mod access_log;

pub use access_log::access_log;
