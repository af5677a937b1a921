//! Tracker Shared Library
//!
//! Models, wire types, derived metrics and validation shared by the
//! command-line client and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::*;
pub use types::*;
