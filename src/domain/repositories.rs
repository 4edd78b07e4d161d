//! Repository provider: one trait object handing out the per-entity
//! repositories, so services depend on a single `Arc<dyn RepositoryProvider>`.

use crate::domain::booking::BookingRepository;
use crate::domain::registration::RegistrationRepository;
use crate::domain::station::StationRepository;
use crate::domain::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn stations(&self) -> &dyn StationRepository;
    fn registrations(&self) -> &dyn RegistrationRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
