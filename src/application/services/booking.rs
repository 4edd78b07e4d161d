//! Booking coordinator service
//!
//! The only place where two pieces of shared state (slot status and the
//! booking ledger) must change together. Validation happens here; the
//! atomic commit itself is delegated to the repository, whose conditional
//! write is the sole arbiter between racing requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::user::Actor;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Book a slot for the acting user at the requested time.
    ///
    /// On success exactly one slot has transitioned to occupied and one
    /// active booking exists for it. A racing request that loses the
    /// conditional write gets `Conflict` and leaves no trace.
    pub async fn book(
        &self,
        actor: &Actor,
        station_id: &str,
        slot_number: i32,
        booking_time: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        if booking_time <= Utc::now() {
            return Err(DomainError::Validation(
                "Booking time must be in the future".to_string(),
            ));
        }

        let station = self
            .repos
            .stations()
            .find_by_id(station_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Station", "id", station_id))?;

        if !station.is_active {
            return Err(DomainError::Validation(format!(
                "Station '{}' is not accepting bookings",
                station.name
            )));
        }

        let slot = station
            .slot(slot_number)
            .ok_or_else(|| DomainError::not_found("Slot", "number", slot_number))?;

        // Politeness check only; the conditional write below is authoritative.
        if !slot.is_available() {
            metrics::counter!("booking_conflicts_total").increment(1);
            return Err(DomainError::Conflict(format!(
                "Slot {} is already occupied",
                slot_number
            )));
        }

        let booking = Booking::new(
            uuid::Uuid::new_v4().to_string(),
            &actor.user_id,
            &actor.email,
            &station.id,
            &station.name,
            slot_number,
            booking_time,
        );

        match self.repos.bookings().commit(booking).await {
            Ok(committed) => {
                metrics::counter!("bookings_committed_total").increment(1);
                info!(
                    booking_id = %committed.id,
                    station_id = %committed.station_id,
                    slot = committed.slot_number,
                    "Booking committed"
                );
                Ok(committed)
            }
            Err(e @ DomainError::Conflict(_)) => {
                metrics::counter!("booking_conflicts_total").increment(1);
                warn!(station_id, slot = slot_number, "Booking lost the race");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel an active booking, releasing its slot. Owner or admin only.
    pub async fn cancel(&self, actor: &Actor, booking_id: &str) -> DomainResult<Booking> {
        self.transition(actor, booking_id, BookingStatus::Cancelled)
            .await
    }

    /// Complete an active booking, releasing its slot. Owner or admin only.
    pub async fn complete(&self, actor: &Actor, booking_id: &str) -> DomainResult<Booking> {
        self.transition(actor, booking_id, BookingStatus::Completed)
            .await
    }

    async fn transition(
        &self,
        actor: &Actor,
        booking_id: &str,
        to: BookingStatus,
    ) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if !actor.can_act_on(&booking.user_id) {
            return Err(DomainError::Forbidden(
                "Booking belongs to another user".to_string(),
            ));
        }

        let released = self.repos.bookings().release(booking_id, to).await?;
        info!(booking_id, status = %released.status, "Booking transitioned");
        Ok(released)
    }

    /// Fetch one booking; owner or admin only.
    pub async fn get(&self, actor: &Actor, booking_id: &str) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if !actor.can_act_on(&booking.user_id) {
            return Err(DomainError::Forbidden(
                "Booking belongs to another user".to_string(),
            ));
        }
        Ok(booking)
    }

    /// The acting user's own bookings, newest first.
    pub async fn list_own(&self, actor: &Actor) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_for_user(&actor.user_id).await
    }

    /// Every booking in the ledger. Admin only.
    pub async fn list_all(&self, actor: &Actor) -> DomainResult<Vec<Booking>> {
        actor.require_admin()?;
        self.repos.bookings().find_all().await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{generate_slots, SlotTypes};
    use crate::domain::station::{OwnerContact, SlotStatus, Station};
    use crate::domain::user::Role;
    use crate::infrastructure::storage::InMemoryRepositories;
    use chrono::Duration;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            user_id: id.into(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn station(id: &str, slots: i32) -> Station {
        Station {
            id: id.into(),
            name: "Test Hub".into(),
            address: "MG Road".into(),
            city: "Bangalore".into(),
            state: "Karnataka".into(),
            zip_code: "560001".into(),
            phone: None,
            latitude: Some(12.9716),
            longitude: Some(77.5946),
            operating_hours: "24/7".into(),
            pricing: None,
            amenities: vec![],
            owner: OwnerContact::default(),
            slots: generate_slots(slots, SlotTypes::Standard),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    async fn service_with_station(slots: i32) -> (BookingService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        repos.stations().save(station("st-1", slots)).await.unwrap();
        (
            BookingService::new(repos.clone() as Arc<dyn RepositoryProvider>),
            repos,
        )
    }

    fn future_time() -> DateTime<Utc> {
        Utc::now() + Duration::hours(2)
    }

    #[tokio::test]
    async fn booking_occupies_the_slot() {
        let (service, repos) = service_with_station(2).await;
        let user = actor("user-1", Role::User);

        let booking = service.book(&user, "st-1", 1, future_time()).await.unwrap();
        assert!(booking.is_active());

        let station = repos.stations().find_by_id("st-1").await.unwrap().unwrap();
        assert_eq!(station.slot(1).unwrap().status, SlotStatus::Occupied);
        assert_eq!(station.available_slots(), 1);
    }

    #[tokio::test]
    async fn past_booking_time_is_rejected_before_storage() {
        let (service, repos) = service_with_station(1).await;
        let user = actor("user-1", Role::User);

        let err = service
            .book(&user, "st-1", 1, Utc::now() - Duration::minutes(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // No trace in the ledger, slot untouched.
        assert!(repos.bookings().find_all().await.unwrap().is_empty());
        let station = repos.stations().find_by_id("st-1").await.unwrap().unwrap();
        assert!(station.slot(1).unwrap().is_available());
    }

    #[tokio::test]
    async fn second_booking_on_same_slot_conflicts() {
        let (service, _) = service_with_station(1).await;
        let alice = actor("alice", Role::User);
        let bob = actor("bob", Role::User);

        service.book(&alice, "st-1", 1, future_time()).await.unwrap();
        let err = service.book(&bob, "st-1", 1, future_time()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_bookings_yield_exactly_one_winner() {
        let (service, repos) = service_with_station(1).await;
        let service = Arc::new(service);
        let alice = actor("alice", Role::User);
        let bob = actor("bob", Role::User);

        let (a, b) = tokio::join!(
            service.book(&alice, "st-1", 1, future_time()),
            service.book(&bob, "st-1", 1, future_time()),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1, "exactly one booking must win");

        let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(loser, DomainError::Conflict(_)));

        // Exactly one active booking, slot transitioned exactly once.
        let ledger = repos.bookings().find_all().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger[0].is_active());
        let station = repos.stations().find_by_id("st-1").await.unwrap().unwrap();
        assert_eq!(station.slot(1).unwrap().status, SlotStatus::Occupied);
    }

    #[tokio::test]
    async fn cancel_releases_the_slot() {
        let (service, repos) = service_with_station(1).await;
        let user = actor("user-1", Role::User);

        let booking = service.book(&user, "st-1", 1, future_time()).await.unwrap();
        let cancelled = service.cancel(&user, &booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let station = repos.stations().find_by_id("st-1").await.unwrap().unwrap();
        assert!(station.slot(1).unwrap().is_available());
    }

    #[tokio::test]
    async fn cancel_is_not_idempotent() {
        let (service, _) = service_with_station(1).await;
        let user = actor("user-1", Role::User);

        let booking = service.book(&user, "st-1", 1, future_time()).await.unwrap();
        service.cancel(&user, &booking.id).await.unwrap();
        let err = service.cancel(&user, &booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn foreign_booking_is_forbidden() {
        let (service, _) = service_with_station(1).await;
        let alice = actor("alice", Role::User);
        let bob = actor("bob", Role::User);

        let booking = service.book(&alice, "st-1", 1, future_time()).await.unwrap();
        let err = service.cancel(&bob, &booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // Admin may act on anyone's booking.
        let admin = actor("root", Role::Admin);
        service.cancel(&admin, &booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn inactive_station_rejects_bookings() {
        let (service, repos) = service_with_station(1).await;
        repos.stations().set_active("st-1", false).await.unwrap();

        let err = service
            .book(&actor("user-1", Role::User), "st-1", 1, future_time())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_slot_is_not_found() {
        let (service, _) = service_with_station(2).await;
        let err = service
            .book(&actor("user-1", Role::User), "st-1", 9, future_time())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_all_requires_admin() {
        let (service, _) = service_with_station(1).await;
        let err = service
            .list_all(&actor("user-1", Role::User))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(service
            .list_all(&actor("root", Role::Admin))
            .await
            .unwrap()
            .is_empty());
    }
}
