//! Station and slot domain entities

use chrono::{DateTime, Utc};

use crate::domain::geo::Coordinate;

/// Charger type offered by a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargerType {
    Standard,
    Fast,
}

impl ChargerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "fast" => Self::Fast,
            _ => Self::Standard,
        }
    }
}

impl std::fmt::Display for ChargerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Occupied,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "available" => Self::Available,
            _ => Self::Occupied,
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An individually bookable charging point within a station.
///
/// Slot numbers are 1-based and stable for the lifetime of the station.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub number: i32,
    pub status: SlotStatus,
    pub charger_type: ChargerType,
}

impl Slot {
    pub fn new(number: i32, charger_type: ChargerType) -> Self {
        Self {
            number,
            status: SlotStatus::Available,
            charger_type,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// Owner contact details attached to a station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A physical EV charging location ("bunk") with one or more slots.
#[derive(Debug, Clone)]
pub struct Station {
    /// Unique station ID
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Free-form, e.g. "24/7" or "6:00 AM - 11:00 PM"
    pub operating_hours: String,
    pub pricing: Option<String>,
    pub amenities: Vec<String>,
    pub owner: OwnerContact,
    /// Ordered by slot number
    pub slots: Vec<Slot>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Station {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    pub fn slot(&self, number: i32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.number == number)
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn available_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_available()).count()
    }

    /// Fraction of slots currently available; 0.0 for a station with no slots.
    pub fn availability_ratio(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.available_slots() as f64 / self.slots.len() as f64
    }

    pub fn is_open_24_7(&self) -> bool {
        self.operating_hours == "24/7"
    }

    pub fn has_charger_type(&self, charger_type: ChargerType) -> bool {
        self.slots.iter().any(|s| s.charger_type == charger_type)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_station(slots: Vec<Slot>) -> Station {
        Station {
            id: "st-1".into(),
            name: "Delhi EV Charging Hub".into(),
            address: "Connaught Place".into(),
            city: "New Delhi".into(),
            state: "Delhi".into(),
            zip_code: "110001".into(),
            phone: None,
            latitude: Some(28.6315),
            longitude: Some(77.2167),
            operating_hours: "24/7".into(),
            pricing: Some("₹5.00/kWh".into()),
            amenities: vec!["Wi-Fi".into()],
            owner: OwnerContact::default(),
            slots,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn availability_counts_available_slots() {
        let mut s2 = Slot::new(2, ChargerType::Fast);
        s2.status = SlotStatus::Occupied;
        let station = sample_station(vec![Slot::new(1, ChargerType::Standard), s2]);

        assert_eq!(station.total_slots(), 2);
        assert_eq!(station.available_slots(), 1);
        assert!((station.availability_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_station_has_zero_ratio() {
        let station = sample_station(vec![]);
        assert_eq!(station.availability_ratio(), 0.0);
    }

    #[test]
    fn slot_lookup_by_number() {
        let station = sample_station(vec![
            Slot::new(1, ChargerType::Standard),
            Slot::new(2, ChargerType::Fast),
        ]);
        assert_eq!(station.slot(2).unwrap().charger_type, ChargerType::Fast);
        assert!(station.slot(3).is_none());
    }

    #[test]
    fn coordinate_requires_both_fields() {
        let mut station = sample_station(vec![]);
        assert!(station.coordinate().is_some());
        station.longitude = None;
        assert!(station.coordinate().is_none());
    }

    #[test]
    fn status_and_type_string_roundtrip() {
        for status in &[SlotStatus::Available, SlotStatus::Occupied] {
            assert_eq!(&SlotStatus::from_str(status.as_str()), status);
        }
        for ct in &[ChargerType::Standard, ChargerType::Fast] {
            assert_eq!(&ChargerType::from_str(ct.as_str()), ct);
        }
    }

    #[test]
    fn open_24_7_flag() {
        let mut station = sample_station(vec![]);
        assert!(station.is_open_24_7());
        station.operating_hours = "6:00 AM - 11:00 PM".into();
        assert!(!station.is_open_24_7());
    }
}
