//! Station DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::discovery::StationView;
use crate::domain::station::{Slot, Station};

/// Query parameters for the discovery listing.
///
/// All filters combine with AND; omitted parameters do not constrain the
/// result. `lat`/`lng` give the caller position for distance computation
/// and the default distance sort.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StationQuery {
    /// Free-text search over name, address, city and state
    pub search: Option<String>,
    /// Exact city or state name
    pub location: Option<String>,
    /// "standard" or "fast"
    pub charger_type: Option<String>,
    /// Only stations with at least one available slot
    #[serde(default)]
    pub available_now: bool,
    /// Only stations offering fast charging
    #[serde(default)]
    pub fast_only: bool,
    /// Only stations open 24/7
    #[serde(default)]
    pub open_24_7: bool,
    /// "distance" (default), "availability", "name" or "city"
    pub sort: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotDto {
    pub number: i32,
    pub status: String,
    pub charger_type: String,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            number: s.number,
            status: s.status.as_str().to_string(),
            charger_type: s.charger_type.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub operating_hours: String,
    pub pricing: Option<String>,
    pub amenities: Vec<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub total_slots: usize,
    pub available_slots: usize,
    pub slots: Vec<SlotDto>,
    pub is_active: bool,
    /// Kilometers from the caller, when a position was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Display form, e.g. "1.5 km"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

impl StationDto {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            address: station.address.clone(),
            city: station.city.clone(),
            state: station.state.clone(),
            zip_code: station.zip_code.clone(),
            phone: station.phone.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            operating_hours: station.operating_hours.clone(),
            pricing: station.pricing.clone(),
            amenities: station.amenities.clone(),
            owner_name: station.owner.name.clone(),
            owner_email: station.owner.email.clone(),
            owner_phone: station.owner.phone.clone(),
            total_slots: station.total_slots(),
            available_slots: station.available_slots(),
            slots: station.slots.iter().map(SlotDto::from).collect(),
            is_active: station.is_active,
            distance_km: None,
            distance: None,
        }
    }

    pub fn from_view(view: &StationView) -> Self {
        let mut dto = Self::from_station(&view.station);
        dto.distance_km = view.distance_km;
        dto.distance = view.formatted_distance();
        dto
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStationRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address must be 1-200 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city must be 1-100 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "state must be 1-100 characters"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "zip code must be 1-20 characters"))]
    pub zip_code: String,
    pub phone: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "operating hours must be 1-100 characters"))]
    pub operating_hours: String,
    pub pricing: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(length(min = 1, max = 100, message = "owner name must be 1-100 characters"))]
    pub owner_name: String,
    #[validate(email(message = "invalid owner email"))]
    pub owner_email: String,
    #[validate(length(min = 1, max = 20, message = "owner phone must be 1-20 characters"))]
    pub owner_phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address must be 1-200 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city must be 1-100 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "state must be 1-100 characters"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "zip code must be 1-20 characters"))]
    pub zip_code: String,
    pub phone: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "operating hours must be 1-100 characters"))]
    pub operating_hours: String,
    pub pricing: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(length(min = 1, max = 100, message = "owner name must be 1-100 characters"))]
    pub owner_name: String,
    #[validate(email(message = "invalid owner email"))]
    pub owner_email: String,
    #[validate(length(min = 1, max = 20, message = "owner phone must be 1-20 characters"))]
    pub owner_phone: String,
    #[validate(range(min = 1, max = 100, message = "total slots must be 1-100"))]
    pub total_slots: i32,
    /// "standard", "fast" or "both"
    #[validate(length(min = 1, message = "slot types is required"))]
    pub slot_types: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetSlotStatusRequest {
    /// "available" or "occupied"
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}
