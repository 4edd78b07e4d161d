//! Slot entity
//!
//! One row per charging point. Slots live in their own table (not an
//! embedded array on the station) so a status transition can be a
//! conditional single-row UPDATE.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub station_id: String,

    /// 1-based, stable for the lifetime of the station
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: i32,

    /// "available" | "occupied"
    pub status: String,

    /// "standard" | "fast"
    pub charger_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::station::Entity",
        from = "Column::StationId",
        to = "super::station::Column::Id"
    )]
    Station,
}

impl Related<super::station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
