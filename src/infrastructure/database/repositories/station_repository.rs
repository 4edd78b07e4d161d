//! SeaORM implementation of StationRepository
//!
//! Stations and their slot rows are loaded and saved together; the domain
//! always sees a `Station` with its full slot list.

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{db_err, txn_err};
use crate::domain::station::{
    ChargerType, OwnerContact, Slot, SlotStatus, Station, StationRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{slot, station};

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_slots(&self, station_id: &str) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .filter(slot::Column::StationId.eq(station_id))
            .order_by_asc(slot::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(slot_to_domain).collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn slot_to_domain(m: slot::Model) -> Slot {
    Slot {
        number: m.number,
        status: SlotStatus::from_str(&m.status),
        charger_type: ChargerType::from_str(&m.charger_type),
    }
}

pub(crate) fn model_to_domain(m: station::Model, slots: Vec<Slot>) -> Station {
    Station {
        id: m.id,
        name: m.name,
        address: m.address,
        city: m.city,
        state: m.state,
        zip_code: m.zip_code,
        phone: m.phone,
        latitude: m.latitude,
        longitude: m.longitude,
        operating_hours: m.operating_hours,
        pricing: m.pricing,
        amenities: serde_json::from_str(&m.amenities).unwrap_or_default(),
        owner: OwnerContact {
            name: m.owner_name,
            email: m.owner_email,
            phone: m.owner_phone,
        },
        slots,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

pub(crate) fn station_to_active(s: &Station) -> station::ActiveModel {
    station::ActiveModel {
        id: Set(s.id.clone()),
        name: Set(s.name.clone()),
        address: Set(s.address.clone()),
        city: Set(s.city.clone()),
        state: Set(s.state.clone()),
        zip_code: Set(s.zip_code.clone()),
        phone: Set(s.phone.clone()),
        latitude: Set(s.latitude),
        longitude: Set(s.longitude),
        operating_hours: Set(s.operating_hours.clone()),
        pricing: Set(s.pricing.clone()),
        amenities: Set(serde_json::to_string(&s.amenities).unwrap_or_else(|_| "[]".into())),
        owner_name: Set(s.owner.name.clone()),
        owner_email: Set(s.owner.email.clone()),
        owner_phone: Set(s.owner.phone.clone()),
        is_active: Set(s.is_active),
        created_at: Set(s.created_at),
    }
}

pub(crate) fn slots_to_active(station_id: &str, slots: &[Slot]) -> Vec<slot::ActiveModel> {
    slots
        .iter()
        .map(|s| slot::ActiveModel {
            station_id: Set(station_id.to_string()),
            number: Set(s.number),
            status: Set(s.status.as_str().to_string()),
            charger_type: Set(s.charger_type.as_str().to_string()),
        })
        .collect()
}

// ── StationRepository impl ──────────────────────────────────────

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn save(&self, station: Station) -> DomainResult<()> {
        debug!("Saving station: {} ({})", station.name, station.id);

        self.db
            .transaction::<_, (), DomainError>(|txn| {
                Box::pin(async move {
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
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Station>> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };
        let slots = self.load_slots(&model.id).await?;
        Ok(Some(model_to_domain(model, slots)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let models = station::Entity::find()
            .order_by_desc(station::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut stations = Vec::with_capacity(models.len());
        for model in models {
            let slots = self.load_slots(&model.id).await?;
            stations.push(model_to_domain(model, slots));
        }
        Ok(stations)
    }

    async fn find_active(&self) -> DomainResult<Vec<Station>> {
        let models = station::Entity::find()
            .filter(station::Column::IsActive.eq(true))
            .order_by_desc(station::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut stations = Vec::with_capacity(models.len());
        for model in models {
            let slots = self.load_slots(&model.id).await?;
            stations.push(model_to_domain(model, slots));
        }
        Ok(stations)
    }

    async fn update(&self, station: Station) -> DomainResult<()> {
        debug!("Updating station: {}", station.id);

        let existing = station::Entity::find_by_id(&station.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: station.id.clone(),
            });
        }

        station_to_active(&station)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<()> {
        let result = station::Entity::update_many()
            .col_expr(station::Column::IsActive, Expr::value(is_active))
            .filter(station::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting station: {}", id);

        // Slot rows go with the station via the cascading foreign key.
        let result = station::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn set_slot_status(
        &self,
        station_id: &str,
        slot_number: i32,
        status: SlotStatus,
    ) -> DomainResult<()> {
        let result = slot::Entity::update_many()
            .col_expr(slot::Column::Status, Expr::value(status.as_str()))
            .filter(slot::Column::StationId.eq(station_id))
            .filter(slot::Column::Number.eq(slot_number))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Slot",
                field: "number",
                value: format!("{}/{}", station_id, slot_number),
            });
        }
        Ok(())
    }
}
