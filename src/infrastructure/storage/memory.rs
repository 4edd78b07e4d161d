//! In-memory repository implementation
//!
//! DashMap-backed storage for development and testing. One struct
//! implements every repository trait plus `RepositoryProvider`, so tests
//! can hand services an `Arc<InMemoryRepositories>` directly.
//!
//! The compound mutations (`commit`, `release`, `approve`, `reject`) take
//! a single async mutex so they are atomic with respect to each other,
//! mirroring the transactional guarantees of the SeaORM backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::registration::{
    RegistrationRepository, RegistrationRequest, RegistrationStatus,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::{SlotStatus, Station, StationRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};

pub struct InMemoryRepositories {
    users: DashMap<String, User>,
    stations: DashMap<String, Station>,
    registrations: DashMap<String, RegistrationRequest>,
    bookings: DashMap<String, Booking>,
    /// Serializes multi-record mutations
    write_lock: Mutex<()>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            stations: DashMap::new(),
            registrations: DashMap::new(),
            bookings: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn registrations(&self) -> &dyn RegistrationRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }
}

// ── UserRepository ──────────────────────────────────────────────

#[async_trait]
impl UserRepository for InMemoryRepositories {
    async fn save(&self, user: User) -> DomainResult<()> {
        // Mirror the unique index on email.
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn update_profile(
        &self,
        id: &str,
        name: &str,
        phone: Option<String>,
        vehicle_type: Option<String>,
    ) -> DomainResult<()> {
        let mut user = self.users.get_mut(id).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        user.name = name.to_string();
        user.phone = phone;
        user.vehicle_type = vehicle_type;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let mut user = self.users.get_mut(id).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        user.password_hash = password_hash.to_string();
        user.reset_token_hash = None;
        user.reset_token_expires_at = None;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut user = self.users.get_mut(id).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        user.reset_token_hash = Some(token_hash.to_string());
        user.reset_token_expires_at = Some(expires_at);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let mut user = self.users.get_mut(id).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        user.last_login_at = Some(Utc::now());
        Ok(())
    }
}

// ── StationRepository ───────────────────────────────────────────

#[async_trait]
impl StationRepository for InMemoryRepositories {
    async fn save(&self, station: Station) -> DomainResult<()> {
        self.stations.insert(station.id.clone(), station);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let mut all: Vec<Station> = self.stations.iter().map(|s| s.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_active(&self) -> DomainResult<Vec<Station>> {
        let mut active: Vec<Station> = self
            .stations
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.clone())
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn update(&self, station: Station) -> DomainResult<()> {
        let mut existing = self
            .stations
            .get_mut(&station.id)
            .ok_or(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: station.id.clone(),
            })?;
        // Metadata only; the live slot list is preserved.
        let slots = existing.slots.clone();
        *existing = Station { slots, ..station };
        Ok(())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<()> {
        let mut station = self.stations.get_mut(id).ok_or(DomainError::NotFound {
            entity: "Station",
            field: "id",
            value: id.to_string(),
        })?;
        station.is_active = is_active;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.stations.remove(id).ok_or(DomainError::NotFound {
            entity: "Station",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }

    async fn set_slot_status(
        &self,
        station_id: &str,
        slot_number: i32,
        status: SlotStatus,
    ) -> DomainResult<()> {
        let mut station = self
            .stations
            .get_mut(station_id)
            .ok_or(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: station_id.to_string(),
            })?;
        let slot = station
            .slots
            .iter_mut()
            .find(|s| s.number == slot_number)
            .ok_or(DomainError::NotFound {
                entity: "Slot",
                field: "number",
                value: format!("{}/{}", station_id, slot_number),
            })?;
        slot.status = status;
        Ok(())
    }
}

// ── BookingRepository ───────────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryRepositories {
    async fn commit(&self, booking: Booking) -> DomainResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut station =
            self.stations
                .get_mut(&booking.station_id)
                .ok_or(DomainError::NotFound {
                    entity: "Station",
                    field: "id",
                    value: booking.station_id.clone(),
                })?;
        let slot = station
            .slots
            .iter_mut()
            .find(|s| s.number == booking.slot_number)
            .ok_or(DomainError::NotFound {
                entity: "Slot",
                field: "number",
                value: format!("{}/{}", booking.station_id, booking.slot_number),
            })?;

        if slot.status != SlotStatus::Available {
            return Err(DomainError::Conflict(format!(
                "Slot {} at station {} is no longer available",
                booking.slot_number, booking.station_id
            )));
        }
        slot.status = SlotStatus::Occupied;
        drop(station);

        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn release(&self, booking_id: &str, to: BookingStatus) -> DomainResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })?;
        if booking.status != BookingStatus::Active {
            return Err(DomainError::Conflict(format!(
                "Booking {} is already {}",
                booking_id, booking.status
            )));
        }
        booking.status = to;
        let released = booking.clone();
        drop(booking);

        if let Some(mut station) = self.stations.get_mut(&released.station_id) {
            if let Some(slot) = station
                .slots
                .iter_mut()
                .find(|s| s.number == released.slot_number)
            {
                slot.status = SlotStatus::Available;
            }
        }
        Ok(released)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let mut own: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone())
            .collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(own)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|b| b.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_active_for_slot(
        &self,
        station_id: &str,
        slot_number: i32,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|b| {
                b.station_id == station_id
                    && b.slot_number == slot_number
                    && b.status == BookingStatus::Active
            })
            .map(|b| b.clone()))
    }
}

// ── RegistrationRepository ──────────────────────────────────────

#[async_trait]
impl RegistrationRepository for InMemoryRepositories {
    async fn save(&self, request: RegistrationRequest) -> DomainResult<()> {
        self.registrations.insert(request.id.clone(), request);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RegistrationRequest>> {
        Ok(self.registrations.get(id).map(|r| r.clone()))
    }

    async fn find_pending(&self) -> DomainResult<Vec<RegistrationRequest>> {
        let mut pending: Vec<RegistrationRequest> = self
            .registrations
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.clone())
            .collect();
        pending.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(pending)
    }

    async fn find_all(&self) -> DomainResult<Vec<RegistrationRequest>> {
        let mut all: Vec<RegistrationRequest> =
            self.registrations.iter().map(|r| r.clone()).collect();
        all.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(all)
    }

    async fn approve(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        station: Station,
    ) -> DomainResult<Station> {
        let _guard = self.write_lock.lock().await;

        let mut request =
            self.registrations
                .get_mut(registration_id)
                .ok_or(DomainError::NotFound {
                    entity: "Registration",
                    field: "id",
                    value: registration_id.to_string(),
                })?;
        if !request.is_pending() {
            return Err(DomainError::Conflict(format!(
                "Registration {} has already been {}",
                registration_id, request.status
            )));
        }
        request.status = RegistrationStatus::Approved;
        request.reviewed_by = Some(reviewer_id.to_string());
        request.reviewed_at = Some(Utc::now());
        request.station_id = Some(station.id.clone());
        drop(request);

        self.stations.insert(station.id.clone(), station.clone());
        Ok(station)
    }

    async fn reject(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        reason: &str,
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut request =
            self.registrations
                .get_mut(registration_id)
                .ok_or(DomainError::NotFound {
                    entity: "Registration",
                    field: "id",
                    value: registration_id.to_string(),
                })?;
        if !request.is_pending() {
            return Err(DomainError::Conflict(format!(
                "Registration {} has already been {}",
                registration_id, request.status
            )));
        }
        request.status = RegistrationStatus::Rejected;
        request.reviewed_by = Some(reviewer_id.to_string());
        request.reviewed_at = Some(Utc::now());
        request.rejection_reason = Some(reason.to_string());
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{generate_slots, SlotTypes};
    use crate::domain::station::OwnerContact;

    fn station(id: &str) -> Station {
        Station {
            id: id.into(),
            name: "Memory Hub".into(),
            address: "Test Lane".into(),
            city: "Chennai".into(),
            state: "Tamil Nadu".into(),
            zip_code: "600001".into(),
            phone: None,
            latitude: None,
            longitude: None,
            operating_hours: "24/7".into(),
            pricing: None,
            amenities: vec![],
            owner: OwnerContact::default(),
            slots: generate_slots(2, SlotTypes::Standard),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn commit_flips_slot_and_records_booking() {
        let repos = InMemoryRepositories::new();
        StationRepository::save(&repos, station("st-1")).await.unwrap();

        let booking = Booking::new(
            "bk-1",
            "user-1",
            "user@example.com",
            "st-1",
            "Memory Hub",
            1,
            Utc::now() + chrono::Duration::hours(1),
        );
        repos.commit(booking).await.unwrap();

        let stored = StationRepository::find_by_id(&repos, "st-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.slot(1).unwrap().status, SlotStatus::Occupied);
        assert!(BookingRepository::find_by_id(&repos, "bk-1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn second_commit_on_same_slot_conflicts() {
        let repos = InMemoryRepositories::new();
        StationRepository::save(&repos, station("st-1")).await.unwrap();

        let book = |id: &str| {
            Booking::new(
                id,
                "user-1",
                "user@example.com",
                "st-1",
                "Memory Hub",
                1,
                Utc::now() + chrono::Duration::hours(1),
            )
        };
        repos.commit(book("bk-1")).await.unwrap();
        let err = repos.commit(book("bk-2")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(BookingRepository::find_by_id(&repos, "bk-2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn release_returns_slot_to_available() {
        let repos = InMemoryRepositories::new();
        StationRepository::save(&repos, station("st-1")).await.unwrap();

        let booking = Booking::new(
            "bk-1",
            "user-1",
            "user@example.com",
            "st-1",
            "Memory Hub",
            2,
            Utc::now() + chrono::Duration::hours(1),
        );
        repos.commit(booking).await.unwrap();
        let released = repos.release("bk-1", BookingStatus::Completed).await.unwrap();
        assert_eq!(released.status, BookingStatus::Completed);

        let stored = StationRepository::find_by_id(&repos, "st-1")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.slot(2).unwrap().is_available());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repos = InMemoryRepositories::new();
        let user = User {
            id: "user-1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            vehicle_type: None,
            role: crate::domain::user::Role::User,
            password_hash: "hash".into(),
            is_active: true,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };
        UserRepository::save(&repos, user.clone()).await.unwrap();

        let mut dup = user;
        dup.id = "user-2".into();
        let err = UserRepository::save(&repos, dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
