//! Registration repository interface

use async_trait::async_trait;

use super::model::RegistrationRequest;
use crate::domain::station::Station;
use crate::domain::DomainResult;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Persist a new pending request
    async fn save(&self, request: RegistrationRequest) -> DomainResult<()>;

    /// Find request by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RegistrationRequest>>;

    /// Pending requests, oldest first (review queue order)
    async fn find_pending(&self) -> DomainResult<Vec<RegistrationRequest>>;

    /// All requests, newest first
    async fn find_all(&self) -> DomainResult<Vec<RegistrationRequest>>;

    /// Atomically mark a pending request approved and create the station
    /// (with its slot list).
    ///
    /// The status flip is conditional on the request still being `pending`;
    /// a request already in a terminal state yields `DomainError::Conflict`
    /// and no station is created. Either both effects commit or neither.
    async fn approve(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        station: Station,
    ) -> DomainResult<Station>;

    /// Atomically mark a pending request rejected. Same conditional
    /// discipline as `approve`; never creates a station.
    async fn reject(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        reason: &str,
    ) -> DomainResult<()>;
}
