//! User repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: User) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Total number of accounts (used for first-run admin bootstrap)
    async fn count(&self) -> DomainResult<u64>;

    /// Update profile fields (name, phone, vehicle type)
    async fn update_profile(
        &self,
        id: &str,
        name: &str,
        phone: Option<String>,
        vehicle_type: Option<String>,
    ) -> DomainResult<()>;

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()>;

    /// Store a hashed password-reset token with its expiry
    async fn set_reset_token(
        &self,
        id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
}
