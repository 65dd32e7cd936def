//! Inbound interfaces (HTTP API)

pub mod http;
