//! HTTP protocol layer module
//!
//! Response builders shared by the dispatch path and application handlers,
//! decoupled from routing logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response, json_response,
};
