//! Plot registry endpoints

pub mod dto;
pub mod handlers;

pub use handlers::PlotsState;
