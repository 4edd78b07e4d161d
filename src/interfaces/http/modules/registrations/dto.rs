//! Registration DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::registration::RegistrationRequest;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRegistrationRequest {
    #[validate(length(min = 1, max = 100, message = "station name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address must be 1-200 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city must be 1-100 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "state must be 1-100 characters"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "zip code must be 1-20 characters"))]
    pub zip_code: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within -90..90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within -180..180"))]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "owner name must be 1-100 characters"))]
    pub owner_name: String,
    #[validate(email(message = "owner email must be valid"))]
    pub owner_email: String,
    #[validate(length(min = 1, max = 20, message = "owner phone must be 1-20 characters"))]
    pub owner_phone: String,
    #[validate(range(min = 1, max = 100, message = "total slots must be 1-100"))]
    pub total_slots: i32,
    /// "standard", "fast" or "both"
    #[serde(default = "default_slot_types")]
    pub slot_types: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(length(min = 1, max = 100, message = "operating hours must be 1-100 characters"))]
    pub operating_hours: String,
    #[validate(length(max = 100, message = "pricing must be at most 100 characters"))]
    pub pricing: Option<String>,
}

fn default_slot_types() -> String {
    "standard".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectRequest {
    #[validate(length(min = 1, max = 500, message = "reason must be 1-500 characters"))]
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub total_slots: i32,
    pub slot_types: String,
    pub amenities: Vec<String>,
    pub operating_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
}

impl From<RegistrationRequest> for RegistrationDto {
    fn from(r: RegistrationRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            phone: r.phone,
            latitude: r.latitude,
            longitude: r.longitude,
            owner_name: r.owner.name,
            owner_email: r.owner.email,
            owner_phone: r.owner.phone,
            total_slots: r.total_slots,
            slot_types: r.slot_types.as_str().to_string(),
            amenities: r.amenities,
            operating_hours: r.operating_hours,
            pricing: r.pricing,
            status: r.status.as_str().to_string(),
            submitted_at: r.submitted_at,
            reviewed_by: r.reviewed_by,
            reviewed_at: r.reviewed_at,
            rejection_reason: r.rejection_reason,
            station_id: r.station_id,
        }
    }
}
