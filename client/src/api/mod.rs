//! HTTP access to the tracker backends

pub mod client;
pub mod endpoints;

pub use client::{decode, ApiClient, RequestContext};
pub use endpoints::{AppFlavor, Endpoints};
