//! Authentication endpoints: registration, login, profile, password flows

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
