//! Station registration request entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[sea_orm(nullable)]
    pub phone: Option<String>,
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,

    pub total_slots: i32,
    /// "standard" | "fast" | "both"
    pub slot_types: String,
    /// JSON-encoded list of amenity names
    pub amenities: String,
    pub operating_hours: String,
    #[sea_orm(nullable)]
    pub pricing: Option<String>,

    /// "pending" | "approved" | "rejected"
    pub status: String,
    pub submitted_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub reviewed_by: Option<String>,
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub rejection_reason: Option<String>,
    /// Station created on approval
    #[sea_orm(nullable)]
    pub station_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
