//! Core business entities, types and traits

pub mod booking;
pub mod error;
pub mod geo;
pub mod registration;
pub mod repositories;
pub mod station;
pub mod user;

pub use booking::{Booking, BookingRepository, BookingStatus};
pub use error::{DomainError, DomainResult};
pub use geo::{format_distance_km, haversine_km, Coordinate};
pub use registration::{
    generate_slots, RegistrationRepository, RegistrationRequest, RegistrationStatus, SlotTypes,
};
pub use repositories::RepositoryProvider;
pub use station::{ChargerType, OwnerContact, Slot, SlotStatus, Station, StationRepository};
pub use user::{Actor, Role, User, UserRepository};
