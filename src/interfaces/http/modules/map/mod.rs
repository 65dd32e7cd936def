//! Public map rendering endpoints

pub mod dto;
pub mod handlers;

pub use handlers::MapState;
