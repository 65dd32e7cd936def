//! SeaORM entities

pub mod booking;
pub mod layout;
pub mod plot;
pub mod user;
