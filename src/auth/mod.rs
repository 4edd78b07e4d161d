//! Authentication primitives: JWT sessions, password hashing, reset tokens

pub mod jwt;
pub mod password;
pub mod reset_token;

pub use jwt::{create_token, verify_token, Claims, JwtConfig};
pub use password::{hash_password, verify_password};
