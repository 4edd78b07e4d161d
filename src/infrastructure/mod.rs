//! Infrastructure layer: persistence and in-memory storage

pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
