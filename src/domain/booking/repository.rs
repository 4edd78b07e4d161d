//! Booking repository interface
//!
//! `commit` and `release` are the two multi-record mutations in the system.
//! Implementations must make each one atomic with respect to concurrent
//! callers: either both the booking record and the slot status change, or
//! neither does.

use async_trait::async_trait;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically transition the target slot `available -> occupied` and
    /// append the booking with status `active`.
    ///
    /// The slot transition is a conditional write: if the slot is no longer
    /// available at commit time the whole operation fails with
    /// `DomainError::Conflict` and no booking is written. First committer
    /// wins; racing requests observe the new `occupied` state.
    async fn commit(&self, booking: Booking) -> DomainResult<Booking>;

    /// Atomically transition an `active` booking to `completed` or
    /// `cancelled` and release its slot back to `available`.
    ///
    /// Conditional on the booking still being `active`; a booking already in
    /// a terminal state yields `DomainError::Conflict`.
    async fn release(&self, booking_id: &str, to: BookingStatus) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// All bookings for one user, newest first
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings (any status), newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Active booking currently holding a slot, if any
    async fn find_active_for_slot(
        &self,
        station_id: &str,
        slot_number: i32,
    ) -> DomainResult<Option<Booking>>;
}
