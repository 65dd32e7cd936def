//! HTTP endpoint modules, one per API surface

pub mod auth;
pub mod bookings;
pub mod health;
pub mod layouts;
pub mod map;
pub mod plots;
