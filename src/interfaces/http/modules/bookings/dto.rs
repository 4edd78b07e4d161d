//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::booking::Booking;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "station id is required"))]
    pub station_id: String,
    #[validate(range(min = 1, message = "slot number must be positive"))]
    pub slot_number: i32,
    /// Requested charging start; must be in the future
    pub booking_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub station_id: String,
    pub station_name: String,
    pub slot_number: i32,
    pub booking_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            user_email: b.user_email,
            station_id: b.station_id,
            station_name: b.station_name,
            slot_number: b.slot_number,
            booking_time: b.booking_time,
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}
