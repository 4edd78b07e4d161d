//! SeaORM implementation of RegistrationRepository
//!
//! Approval and rejection flip the status with a conditional UPDATE on
//! `status = 'pending'`, so a request reaches a terminal state exactly
//! once no matter how many admins race on it. The approved station and
//! its slots are inserted in the same transaction as the flip.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::station_repository::{slots_to_active, station_to_active};
use super::{db_err, txn_err};
use crate::domain::registration::{
    RegistrationRepository, RegistrationRequest, RegistrationStatus, SlotTypes,
};
use crate::domain::station::{OwnerContact, Station};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{registration, slot};

pub struct SeaOrmRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: registration::Model) -> RegistrationRequest {
    RegistrationRequest {
        id: m.id,
        name: m.name,
        address: m.address,
        city: m.city,
        state: m.state,
        zip_code: m.zip_code,
        phone: m.phone,
        latitude: m.latitude,
        longitude: m.longitude,
        owner: OwnerContact {
            name: m.owner_name,
            email: m.owner_email,
            phone: m.owner_phone,
        },
        total_slots: m.total_slots,
        slot_types: SlotTypes::from_str(&m.slot_types),
        amenities: serde_json::from_str(&m.amenities).unwrap_or_default(),
        operating_hours: m.operating_hours,
        pricing: m.pricing,
        status: RegistrationStatus::from_str(&m.status),
        submitted_at: m.submitted_at,
        reviewed_by: m.reviewed_by,
        reviewed_at: m.reviewed_at,
        rejection_reason: m.rejection_reason,
        station_id: m.station_id,
    }
}

/// Flip a pending request to a terminal state. Returns the number of
/// affected rows; zero means the request was missing or already decided.
async fn flip_pending(
    txn: &DatabaseTransaction,
    registration_id: &str,
    update: registration::ActiveModel,
) -> DomainResult<u64> {
    let mut query = registration::Entity::update_many()
        .filter(registration::Column::Id.eq(registration_id))
        .filter(registration::Column::Status.eq("pending"));

    // Carry over only the columns the caller set.
    if let sea_orm::ActiveValue::Set(status) = update.status {
        query = query.col_expr(registration::Column::Status, Expr::value(status));
    }
    if let sea_orm::ActiveValue::Set(reviewed_by) = update.reviewed_by {
        query = query.col_expr(registration::Column::ReviewedBy, Expr::value(reviewed_by));
    }
    if let sea_orm::ActiveValue::Set(reviewed_at) = update.reviewed_at {
        query = query.col_expr(registration::Column::ReviewedAt, Expr::value(reviewed_at));
    }
    if let sea_orm::ActiveValue::Set(reason) = update.rejection_reason {
        query = query.col_expr(registration::Column::RejectionReason, Expr::value(reason));
    }
    if let sea_orm::ActiveValue::Set(station_id) = update.station_id {
        query = query.col_expr(registration::Column::StationId, Expr::value(station_id));
    }

    let result = query.exec(txn).await.map_err(db_err)?;
    Ok(result.rows_affected)
}

async fn decision_conflict(
    txn: &DatabaseTransaction,
    registration_id: &str,
) -> DomainResult<DomainError> {
    let existing = registration::Entity::find_by_id(registration_id)
        .one(txn)
        .await
        .map_err(db_err)?;
    Ok(match existing {
        Some(m) => DomainError::Conflict(format!(
            "Registration {} has already been {}",
            registration_id, m.status
        )),
        None => DomainError::NotFound {
            entity: "Registration",
            field: "id",
            value: registration_id.to_string(),
        },
    })
}

// ── RegistrationRepository impl ─────────────────────────────────

#[async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn save(&self, r: RegistrationRequest) -> DomainResult<()> {
        debug!("Saving registration request: {} ({})", r.name, r.id);

        let model = registration::ActiveModel {
            id: Set(r.id),
            name: Set(r.name),
            address: Set(r.address),
            city: Set(r.city),
            state: Set(r.state),
            zip_code: Set(r.zip_code),
            phone: Set(r.phone),
            latitude: Set(r.latitude),
            longitude: Set(r.longitude),
            owner_name: Set(r.owner.name),
            owner_email: Set(r.owner.email),
            owner_phone: Set(r.owner.phone),
            total_slots: Set(r.total_slots),
            slot_types: Set(r.slot_types.as_str().to_string()),
            amenities: Set(serde_json::to_string(&r.amenities).unwrap_or_else(|_| "[]".into())),
            operating_hours: Set(r.operating_hours),
            pricing: Set(r.pricing),
            status: Set(r.status.as_str().to_string()),
            submitted_at: Set(r.submitted_at),
            reviewed_by: Set(r.reviewed_by),
            reviewed_at: Set(r.reviewed_at),
            rejection_reason: Set(r.rejection_reason),
            station_id: Set(r.station_id),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RegistrationRequest>> {
        let model = registration::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_pending(&self) -> DomainResult<Vec<RegistrationRequest>> {
        let models = registration::Entity::find()
            .filter(registration::Column::Status.eq("pending"))
            .order_by_asc(registration::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<RegistrationRequest>> {
        let models = registration::Entity::find()
            .order_by_desc(registration::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn approve(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        station: Station,
    ) -> DomainResult<Station> {
        debug!(
            "Approving registration {} -> station {}",
            registration_id, station.id
        );

        let registration_id = registration_id.to_string();
        let reviewer_id = reviewer_id.to_string();
        self.db
            .transaction::<_, Station, DomainError>(|txn| {
                Box::pin(async move {
                    let update = registration::ActiveModel {
                        status: Set("approved".to_string()),
                        reviewed_by: Set(Some(reviewer_id)),
                        reviewed_at: Set(Some(Utc::now())),
                        station_id: Set(Some(station.id.clone())),
                        ..Default::default()
                    };
                    if flip_pending(txn, &registration_id, update).await? == 0 {
                        return Err(decision_conflict(txn, &registration_id).await?);
                    }

                    station_to_active(&station)
                        .insert(txn)
                        .await
                        .map_err(db_err)?;
                    let slots = slots_to_active(&station.id, &station.slots);
                    if !slots.is_empty() {
                        slot::Entity::insert_many(slots)
                            .exec(txn)
                            .await
                            .map_err(db_err)?;
                    }
                    Ok(station)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn reject(
        &self,
        registration_id: &str,
        reviewer_id: &str,
        reason: &str,
    ) -> DomainResult<()> {
        debug!("Rejecting registration {}", registration_id);

        let registration_id = registration_id.to_string();
        let reviewer_id = reviewer_id.to_string();
        let reason = reason.to_string();
        self.db
            .transaction::<_, (), DomainError>(|txn| {
                Box::pin(async move {
                    let update = registration::ActiveModel {
                        status: Set("rejected".to_string()),
                        reviewed_by: Set(Some(reviewer_id)),
                        reviewed_at: Set(Some(Utc::now())),
                        rejection_reason: Set(Some(reason)),
                        ..Default::default()
                    };
                    if flip_pending(txn, &registration_id, update).await? == 0 {
                        return Err(decision_conflict(txn, &registration_id).await?);
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}
