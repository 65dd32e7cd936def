//! Infrastructure: persistence, storage backends, image collaborators

pub mod database;
pub mod image;
pub mod storage;
