//! Station registration request domain entity

use chrono::{DateTime, Utc};

use crate::domain::station::{ChargerType, OwnerContact, Slot, Station};

/// Slot type preference requested by the prospective owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTypes {
    Standard,
    Fast,
    /// Alternate standard/fast by slot index parity
    Both,
}

impl SlotTypes {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Fast => "fast",
            Self::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "fast" => Self::Fast,
            "both" => Self::Both,
            _ => Self::Standard,
        }
    }
}

/// Registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            _ => Self::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prospective station owner's submission awaiting admin review.
///
/// Approval is the only path that creates a Station; a request reaches a
/// terminal state exactly once.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner: OwnerContact,
    pub total_slots: i32,
    pub slot_types: SlotTypes,
    pub amenities: Vec<String>,
    pub operating_hours: String,
    pub pricing: Option<String>,
    pub status: RegistrationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    /// Station created on approval
    pub station_id: Option<String>,
}

impl RegistrationRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RegistrationStatus::Pending
    }

    /// Deterministically construct the Station this request describes.
    ///
    /// Slot numbers are 1-based. With `SlotTypes::Both` the charger type
    /// alternates by 0-based index parity, standard first; otherwise every
    /// slot takes the single requested type. All slots start available.
    pub fn build_station(&self, station_id: impl Into<String>) -> Station {
        let slots = generate_slots(self.total_slots, self.slot_types);
        Station {
            id: station_id.into(),
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            phone: self.phone.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            operating_hours: self.operating_hours.clone(),
            pricing: self.pricing.clone(),
            amenities: self.amenities.clone(),
            owner: self.owner.clone(),
            slots,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Generate the initial slot list for an approved registration.
pub fn generate_slots(total: i32, slot_types: SlotTypes) -> Vec<Slot> {
    (0..total.max(1))
        .map(|index| {
            let charger_type = match slot_types {
                SlotTypes::Both => {
                    if index % 2 == 0 {
                        ChargerType::Standard
                    } else {
                        ChargerType::Fast
                    }
                }
                SlotTypes::Standard => ChargerType::Standard,
                SlotTypes::Fast => ChargerType::Fast,
            };
            Slot::new(index + 1, charger_type)
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::SlotStatus;

    fn sample_request(total_slots: i32, slot_types: SlotTypes) -> RegistrationRequest {
        RegistrationRequest {
            id: "reg-1".into(),
            name: "Pune Charge Park".into(),
            address: "FC Road".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            zip_code: "411004".into(),
            phone: None,
            latitude: Some(18.5204),
            longitude: Some(73.8567),
            owner: OwnerContact {
                name: "A. Kulkarni".into(),
                email: "owner@example.com".into(),
                phone: "9999999999".into(),
            },
            total_slots,
            slot_types,
            amenities: vec![],
            operating_hours: "24/7".into(),
            pricing: None,
            status: RegistrationStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            station_id: None,
        }
    }

    #[test]
    fn both_alternates_by_index_parity() {
        let slots = generate_slots(4, SlotTypes::Both);
        let types: Vec<ChargerType> = slots.iter().map(|s| s.charger_type).collect();
        assert_eq!(
            types,
            vec![
                ChargerType::Standard,
                ChargerType::Fast,
                ChargerType::Standard,
                ChargerType::Fast,
            ]
        );
        assert_eq!(
            slots.iter().map(|s| s.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(slots.iter().all(|s| s.status == SlotStatus::Available));
    }

    #[test]
    fn single_type_is_uniform() {
        let slots = generate_slots(3, SlotTypes::Fast);
        assert!(slots.iter().all(|s| s.charger_type == ChargerType::Fast));
    }

    #[test]
    fn at_least_one_slot_is_generated() {
        assert_eq!(generate_slots(0, SlotTypes::Standard).len(), 1);
    }

    #[test]
    fn built_station_carries_request_fields() {
        let req = sample_request(2, SlotTypes::Both);
        let station = req.build_station("st-9");
        assert_eq!(station.id, "st-9");
        assert_eq!(station.city, "Pune");
        assert_eq!(station.slots.len(), 2);
        assert!(station.is_active);
    }

    #[test]
    fn terminal_states() {
        assert!(!RegistrationStatus::Pending.is_terminal());
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
    }
}
