//! User domain: accounts, roles, and the acting identity

pub mod model;
pub mod repository;

pub use model::{Actor, Role, User};
pub use repository::UserRepository;
