//! SeaORM implementation of BookingRepository
//!
//! `commit` is the contended path. The slot claim is a conditional
//! UPDATE on (station_id, number, status = 'available') inside a
//! transaction; whichever request flips the row first wins and every
//! other request sees zero affected rows and gets a Conflict. The
//! booking row is only inserted after a successful claim, so the ledger
//! never records a booking whose slot it does not hold.

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{db_err, txn_err};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, slot};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        user_email: m.user_email,
        station_id: m.station_id,
        station_name: m.station_name,
        slot_number: m.slot_number,
        booking_time: m.booking_time,
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

async fn set_slot_status(
    txn: &DatabaseTransaction,
    station_id: &str,
    slot_number: i32,
    from: &str,
    to: &str,
) -> DomainResult<u64> {
    let result = slot::Entity::update_many()
        .col_expr(slot::Column::Status, Expr::value(to))
        .filter(slot::Column::StationId.eq(station_id))
        .filter(slot::Column::Number.eq(slot_number))
        .filter(slot::Column::Status.eq(from))
        .exec(txn)
        .await
        .map_err(db_err)?;
    Ok(result.rows_affected)
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn commit(&self, b: Booking) -> DomainResult<Booking> {
        debug!(
            "Committing booking {} for slot {}/{}",
            b.id, b.station_id, b.slot_number
        );

        self.db
            .transaction::<_, Booking, DomainError>(|txn| {
                Box::pin(async move {
                    let claimed = set_slot_status(
                        txn,
                        &b.station_id,
                        b.slot_number,
                        "available",
                        "occupied",
                    )
                    .await?;

                    if claimed == 0 {
                        let exists = slot::Entity::find_by_id((b.station_id.clone(), b.slot_number))
                            .one(txn)
                            .await
                            .map_err(db_err)?
                            .is_some();
                        if exists {
                            return Err(DomainError::Conflict(format!(
                                "Slot {} at station {} is no longer available",
                                b.slot_number, b.station_id
                            )));
                        }
                        return Err(DomainError::NotFound {
                            entity: "Slot",
                            field: "number",
                            value: format!("{}/{}", b.station_id, b.slot_number),
                        });
                    }

                    let model = booking::ActiveModel {
                        id: Set(b.id.clone()),
                        user_id: Set(b.user_id.clone()),
                        user_email: Set(b.user_email.clone()),
                        station_id: Set(b.station_id.clone()),
                        station_name: Set(b.station_name.clone()),
                        slot_number: Set(b.slot_number),
                        booking_time: Set(b.booking_time),
                        status: Set(b.status.as_str().to_string()),
                        created_at: Set(b.created_at),
                    };
                    model.insert(txn).await.map_err(db_err)?;
                    Ok(b)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn release(&self, booking_id: &str, to: BookingStatus) -> DomainResult<Booking> {
        debug!("Releasing booking {} -> {}", booking_id, to);

        let booking_id = booking_id.to_string();
        self.db
            .transaction::<_, Booking, DomainError>(|txn| {
                Box::pin(async move {
                    let existing = booking::Entity::find_by_id(&booking_id)
                        .one(txn)
                        .await
                        .map_err(db_err)?
                        .ok_or(DomainError::NotFound {
                            entity: "Booking",
                            field: "id",
                            value: booking_id.clone(),
                        })?;

                    let flipped = booking::Entity::update_many()
                        .col_expr(booking::Column::Status, Expr::value(to.as_str()))
                        .filter(booking::Column::Id.eq(&booking_id))
                        .filter(booking::Column::Status.eq("active"))
                        .exec(txn)
                        .await
                        .map_err(db_err)?;

                    if flipped.rows_affected == 0 {
                        return Err(DomainError::Conflict(format!(
                            "Booking {} is already {}",
                            booking_id, existing.status
                        )));
                    }

                    set_slot_status(
                        txn,
                        &existing.station_id,
                        existing.slot_number,
                        "occupied",
                        "available",
                    )
                    .await?;

                    let mut released = model_to_domain(existing);
                    released.status = to;
                    Ok(released)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_for_slot(
        &self,
        station_id: &str,
        slot_number: i32,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::StationId.eq(station_id))
            .filter(booking::Column::SlotNumber.eq(slot_number))
            .filter(booking::Column::Status.eq("active"))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
