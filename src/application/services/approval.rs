//! Registration approval workflow service
//!
//! Moves a registration request from `pending` to exactly one terminal
//! state. Approval is the only path that creates a station; the repository
//! makes the status flip and the station insert a single atomic unit.

use std::sync::Arc;

use tracing::info;

use crate::domain::registration::RegistrationRequest;
use crate::domain::station::Station;
use crate::domain::user::Actor;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct ApprovalService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ApprovalService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Submit a new registration request on behalf of the acting user.
    pub async fn submit(
        &self,
        actor: &Actor,
        request: RegistrationRequest,
    ) -> DomainResult<RegistrationRequest> {
        if !request.is_pending() {
            return Err(DomainError::Validation(
                "New registrations must start as pending".to_string(),
            ));
        }
        self.repos.registrations().save(request.clone()).await?;
        info!(
            registration_id = %request.id,
            submitted_by = %actor.user_id,
            "Registration submitted"
        );
        Ok(request)
    }

    /// Approve a pending request, materializing its station. Admin only.
    ///
    /// A request already in a terminal state yields `Conflict` and creates
    /// nothing; retrying a failed approval is safe because both effects
    /// commit together or not at all.
    pub async fn approve(&self, reviewer: &Actor, registration_id: &str) -> DomainResult<Station> {
        reviewer.require_admin()?;

        let request = self
            .repos
            .registrations()
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration", "id", registration_id))?;

        let station = request.build_station(uuid::Uuid::new_v4().to_string());
        let created = self
            .repos
            .registrations()
            .approve(registration_id, &reviewer.user_id, station)
            .await?;

        metrics::counter!("registrations_approved_total").increment(1);
        info!(
            registration_id,
            station_id = %created.id,
            reviewer = %reviewer.user_id,
            "Registration approved"
        );
        Ok(created)
    }

    /// Reject a pending request with a reason. Admin only.
    pub async fn reject(
        &self,
        reviewer: &Actor,
        registration_id: &str,
        reason: &str,
    ) -> DomainResult<()> {
        reviewer.require_admin()?;

        self.repos
            .registrations()
            .reject(registration_id, &reviewer.user_id, reason)
            .await?;

        metrics::counter!("registrations_rejected_total").increment(1);
        info!(registration_id, reviewer = %reviewer.user_id, "Registration rejected");
        Ok(())
    }

    /// The review queue, oldest first. Admin only.
    pub async fn list_pending(&self, actor: &Actor) -> DomainResult<Vec<RegistrationRequest>> {
        actor.require_admin()?;
        self.repos.registrations().find_pending().await
    }

    /// Every request regardless of status. Admin only.
    pub async fn list_all(&self, actor: &Actor) -> DomainResult<Vec<RegistrationRequest>> {
        actor.require_admin()?;
        self.repos.registrations().find_all().await
    }

    /// Fetch one request; the submitter sees their own, admins see all.
    pub async fn get(&self, actor: &Actor, id: &str) -> DomainResult<RegistrationRequest> {
        let request = self
            .repos
            .registrations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration", "id", id))?;

        if !actor.role.is_admin() && request.owner.email != actor.email {
            return Err(DomainError::Forbidden(
                "Registration belongs to another owner".to_string(),
            ));
        }
        Ok(request)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{RegistrationStatus, SlotTypes};
    use crate::domain::station::{ChargerType, OwnerContact};
    use crate::domain::user::Role;
    use crate::infrastructure::storage::InMemoryRepositories;
    use chrono::Utc;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            user_id: id.into(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn request(id: &str, total_slots: i32, slot_types: SlotTypes) -> RegistrationRequest {
        RegistrationRequest {
            id: id.into(),
            name: "Jaipur Charge Yard".into(),
            address: "MI Road".into(),
            city: "Jaipur".into(),
            state: "Rajasthan".into(),
            zip_code: "302001".into(),
            phone: None,
            latitude: Some(26.9124),
            longitude: Some(75.7873),
            owner: OwnerContact {
                name: "R. Sharma".into(),
                email: "owner@example.com".into(),
                phone: "8888888888".into(),
            },
            total_slots,
            slot_types,
            amenities: vec!["Cafe".into()],
            operating_hours: "24/7".into(),
            pricing: Some("₹5.00/kWh".into()),
            status: RegistrationStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            station_id: None,
        }
    }

    async fn service() -> (ApprovalService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        (
            ApprovalService::new(repos.clone() as Arc<dyn RepositoryProvider>),
            repos,
        )
    }

    #[tokio::test]
    async fn approval_creates_station_with_generated_slots() {
        let (service, repos) = service().await;
        let admin = actor("root", Role::Admin);
        service
            .submit(&actor("owner", Role::User), request("reg-1", 4, SlotTypes::Both))
            .await
            .unwrap();

        let station = service.approve(&admin, "reg-1").await.unwrap();

        let types: Vec<ChargerType> = station.slots.iter().map(|s| s.charger_type).collect();
        assert_eq!(
            types,
            vec![
                ChargerType::Standard,
                ChargerType::Fast,
                ChargerType::Standard,
                ChargerType::Fast,
            ]
        );
        assert!(station.slots.iter().all(|s| s.is_available()));

        let stored = repos
            .registrations()
            .find_by_id("reg-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RegistrationStatus::Approved);
        assert_eq!(stored.station_id.as_deref(), Some(station.id.as_str()));
        assert_eq!(stored.reviewed_by.as_deref(), Some("root"));
    }

    #[tokio::test]
    async fn second_decision_is_rejected() {
        let (service, repos) = service().await;
        let admin = actor("root", Role::Admin);
        service
            .submit(&actor("owner", Role::User), request("reg-1", 2, SlotTypes::Standard))
            .await
            .unwrap();

        service.approve(&admin, "reg-1").await.unwrap();

        let err = service.approve(&admin, "reg-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        let err = service.reject(&admin, "reg-1", "changed my mind").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Only the original station exists.
        assert_eq!(repos.stations().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejection_never_creates_a_station() {
        let (service, repos) = service().await;
        let admin = actor("root", Role::Admin);
        service
            .submit(&actor("owner", Role::User), request("reg-1", 2, SlotTypes::Fast))
            .await
            .unwrap();

        service.reject(&admin, "reg-1", "incomplete address").await.unwrap();

        assert!(repos.stations().find_all().await.unwrap().is_empty());
        let stored = repos
            .registrations()
            .find_by_id("reg-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RegistrationStatus::Rejected);
        assert_eq!(stored.rejection_reason.as_deref(), Some("incomplete address"));

        // A rejected request can never be approved afterwards.
        let err = service.approve(&admin, "reg-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repos.stations().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_admin_cannot_decide() {
        let (service, _) = service().await;
        let user = actor("owner", Role::User);
        service
            .submit(&user, request("reg-1", 1, SlotTypes::Standard))
            .await
            .unwrap();

        assert!(matches!(
            service.approve(&user, "reg-1").await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            service.reject(&user, "reg-1", "nope").await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            service.list_pending(&user).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn concurrent_decisions_yield_one_terminal_state() {
        let (service, repos) = service().await;
        let service = Arc::new(service);
        let admin = actor("root", Role::Admin);
        service
            .submit(&actor("owner", Role::User), request("reg-1", 2, SlotTypes::Standard))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            service.approve(&admin, "reg-1"),
            service.reject(&admin, "reg-1", "duplicate"),
        );

        // Exactly one decision lands; the other observes the terminal state.
        assert!(a.is_ok() ^ b.is_ok(), "exactly one decision must win");
        let stations = repos.stations().find_all().await.unwrap();
        let stored = repos
            .registrations()
            .find_by_id("reg-1")
            .await
            .unwrap()
            .unwrap();
        match stored.status {
            RegistrationStatus::Approved => assert_eq!(stations.len(), 1),
            RegistrationStatus::Rejected => assert!(stations.is_empty()),
            RegistrationStatus::Pending => panic!("request must be terminal"),
        }
    }

    #[tokio::test]
    async fn pending_queue_is_admin_only_and_ordered() {
        let (service, _) = service().await;
        let admin = actor("root", Role::Admin);
        let owner = actor("owner", Role::User);

        let mut first = request("reg-1", 1, SlotTypes::Standard);
        first.submitted_at = Utc::now() - chrono::Duration::hours(1);
        service.submit(&owner, first).await.unwrap();
        service
            .submit(&owner, request("reg-2", 1, SlotTypes::Standard))
            .await
            .unwrap();

        let queue = service.list_pending(&admin).await.unwrap();
        let ids: Vec<&str> = queue.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["reg-1", "reg-2"]);
    }
}
