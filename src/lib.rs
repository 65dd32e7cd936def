//! # PlotMap Service
//!
//! Interactive real-estate plot booking system: layouts (site plan
//! images), plots drawn on top of them, and a booking ledger, plus
//! server-side map rendering.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, geometry and repository traits
//! - **application**: Business logic services and outbound ports
//! - **infrastructure**: External concerns (database, file storage, image probing)
//! - **rendering**: Scene building and the SVG/HTML/JSON map adapters
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT authentication for the admin surface

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod rendering;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig, Migrator, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
