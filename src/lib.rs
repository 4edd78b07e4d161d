//! # ChargeBunk
//!
//! Backend for EV charging station discovery, registration and booking.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic: booking, approval workflow, discovery
//! - **infrastructure**: External concerns (SeaORM persistence, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
