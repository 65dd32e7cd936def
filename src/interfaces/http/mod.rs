//! HTTP interface: REST API modules, router and shared plumbing

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
