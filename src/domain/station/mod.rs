//! Station domain: stations and their charging slots

pub mod model;
pub mod repository;

pub use model::{ChargerType, OwnerContact, Slot, SlotStatus, Station};
pub use repository::StationRepository;
