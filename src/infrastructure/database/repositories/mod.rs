//! SeaORM repository implementations

pub mod booking_repository;
pub mod registration_repository;
pub mod repository_provider;
pub mod station_repository;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use registration_repository::SeaOrmRegistrationRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use station_repository::SeaOrmStationRepository;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

pub(crate) fn txn_err(e: sea_orm::TransactionError<DomainError>) -> DomainError {
    match e {
        sea_orm::TransactionError::Connection(e) => db_err(e),
        sea_orm::TransactionError::Transaction(e) => e,
    }
}
