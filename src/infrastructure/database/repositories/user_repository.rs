//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::db_err;
use crate::domain::user::{Role, User, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require(&self, id: &str) -> DomainResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        vehicle_type: m.vehicle_type,
        role: match m.role {
            user::UserRole::Admin => Role::Admin,
            user::UserRole::User => Role::User,
        },
        password_hash: m.password_hash,
        is_active: m.is_active,
        reset_token_hash: m.reset_token_hash,
        reset_token_expires_at: m.reset_token_expires_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
        last_login_at: m.last_login_at,
    }
}

fn role_to_db(role: Role) -> user::UserRole {
    match role {
        Role::Admin => user::UserRole::Admin,
        Role::User => user::UserRole::User,
    }
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, u: User) -> DomainResult<()> {
        debug!("Saving user: {}", u.email);

        let model = user::ActiveModel {
            id: Set(u.id),
            name: Set(u.name),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            phone: Set(u.phone),
            vehicle_type: Set(u.vehicle_type),
            role: Set(role_to_db(u.role)),
            is_active: Set(u.is_active),
            reset_token_hash: Set(u.reset_token_hash),
            reset_token_expires_at: Set(u.reset_token_expires_at),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
            last_login_at: Set(u.last_login_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_profile(
        &self,
        id: &str,
        name: &str,
        phone: Option<String>,
        vehicle_type: Option<String>,
    ) -> DomainResult<()> {
        let existing = self.require(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.phone = Set(phone);
        active.vehicle_type = Set(vehicle_type);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let existing = self.require(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        // A successful password change consumes any outstanding reset token.
        active.reset_token_hash = Set(None);
        active.reset_token_expires_at = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let existing = self.require(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.reset_token_hash = Set(Some(token_hash.to_string()));
        active.reset_token_expires_at = Set(Some(expires_at));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let existing = self.require(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
