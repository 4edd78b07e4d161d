//! Booking domain entity

use chrono::{DateTime, Utc};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Slot is held by this booking
    Active,
    /// Charging session finished, slot released
    Completed,
    /// Cancelled by user or admin, slot released
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's reservation of a specific slot at a specific future time.
///
/// Immutable once committed, except for status transitions. The station
/// name is a denormalized snapshot taken at booking time.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub station_id: String,
    pub station_name: String,
    pub slot_number: i32,
    pub booking_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        user_email: impl Into<String>,
        station_id: impl Into<String>,
        station_name: impl Into<String>,
        slot_number: i32,
        booking_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            user_email: user_email.into(),
            station_id: station_id.into(),
            station_name: station_name.into(),
            slot_number,
            booking_time,
            status: BookingStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_booking() -> Booking {
        Booking::new(
            "bk-1",
            "user-1",
            "user@example.com",
            "st-1",
            "Delhi EV Charging Hub",
            3,
            Utc::now() + Duration::hours(2),
        )
    }

    #[test]
    fn new_booking_is_active() {
        let b = sample_booking();
        assert!(b.is_active());
        assert_eq!(b.status, BookingStatus::Active);
        assert_eq!(b.slot_number, 3);
    }

    #[test]
    fn ownership_check() {
        let b = sample_booking();
        assert!(b.is_owned_by("user-1"));
        assert!(!b.is_owned_by("user-2"));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(&BookingStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(BookingStatus::from_str("weird"), BookingStatus::Cancelled);
    }
}
