//! Station repository interface

use async_trait::async_trait;

use super::model::{SlotStatus, Station};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Save a new station together with its slot list
    async fn save(&self, station: Station) -> DomainResult<()>;

    /// Find a station (with slots) by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Station>>;

    /// All stations, newest first
    async fn find_all(&self) -> DomainResult<Vec<Station>>;

    /// Active stations only (the discovery view)
    async fn find_active(&self) -> DomainResult<Vec<Station>>;

    /// Update station metadata (slots are not touched)
    async fn update(&self, station: Station) -> DomainResult<()>;

    /// Set the active flag
    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<()>;

    /// Hard-delete a station and its slots
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Administrative slot override: set a slot's status unconditionally.
    /// Fails with NotFound if the slot does not exist.
    async fn set_slot_status(
        &self,
        station_id: &str,
        slot_number: i32,
        status: SlotStatus,
    ) -> DomainResult<()>;
}
