//! Registration domain: station registration requests and approval

pub mod model;
pub mod repository;

pub use model::{generate_slots, RegistrationRequest, RegistrationStatus, SlotTypes};
pub use repository::RegistrationRepository;
