//! Station discovery: client-facing filtering and sorting.
//!
//! Pure functions over loaded stations. All active filters combine with
//! logical AND; an empty result set is a valid outcome, not an error.

use std::cmp::Ordering;

use crate::domain::geo::{format_distance_km, haversine_km, Coordinate};
use crate::domain::station::{ChargerType, Station};

/// Filter specification for the discovery view.
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    /// Case-insensitive substring match on name, address, city or state
    pub search: Option<String>,
    /// Exact city or state name
    pub location: Option<String>,
    /// Station must offer at least one slot of this type
    pub charger_type: Option<ChargerType>,
    /// Exclude stations with zero available slots
    pub available_now: bool,
    /// Station must offer at least one fast slot
    pub fast_only: bool,
    /// Operating hours must be exactly "24/7"
    pub open_24_7: bool,
}

/// Selectable sort key; exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Nearest first; stations without coordinates sort last
    #[default]
    Distance,
    /// available/total ratio, most available first
    Availability,
    /// Name A-Z, case-insensitive
    Name,
    /// City A-Z, case-insensitive
    City,
}

impl SortKey {
    pub fn from_str(s: &str) -> Self {
        match s {
            "availability" => Self::Availability,
            "name" => Self::Name,
            "city" => Self::City,
            _ => Self::Distance,
        }
    }
}

/// A station enriched with the caller-relative distance.
#[derive(Debug, Clone)]
pub struct StationView {
    pub station: Station,
    pub distance_km: Option<f64>,
}

impl StationView {
    /// Distance the way clients display it, e.g. "1.5 km".
    pub fn formatted_distance(&self) -> Option<String> {
        self.distance_km.map(format_distance_km)
    }
}

fn matches(station: &Station, filter: &StationFilter) -> bool {
    if let Some(query) = &filter.search {
        let q = query.to_lowercase();
        let hit = station.name.to_lowercase().contains(&q)
            || station.address.to_lowercase().contains(&q)
            || station.city.to_lowercase().contains(&q)
            || station.state.to_lowercase().contains(&q);
        if !hit {
            return false;
        }
    }

    if let Some(location) = &filter.location {
        if &station.city != location && &station.state != location {
            return false;
        }
    }

    if let Some(charger_type) = filter.charger_type {
        if !station.has_charger_type(charger_type) {
            return false;
        }
    }

    if filter.available_now && station.available_slots() == 0 {
        return false;
    }

    if filter.fast_only && !station.has_charger_type(ChargerType::Fast) {
        return false;
    }

    if filter.open_24_7 && !station.is_open_24_7() {
        return false;
    }

    true
}

fn compare(a: &StationView, b: &StationView, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Distance => match (a.distance_km, b.distance_km) {
            (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Availability => {
            let ra = a.station.availability_ratio();
            let rb = b.station.availability_ratio();
            rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
        }
        SortKey::Name => a
            .station
            .name
            .to_lowercase()
            .cmp(&b.station.name.to_lowercase()),
        SortKey::City => a
            .station
            .city
            .to_lowercase()
            .cmp(&b.station.city.to_lowercase()),
    }
}

/// Produce the filtered, sorted discovery view.
pub fn filter_and_sort(
    stations: Vec<Station>,
    filter: &StationFilter,
    sort: SortKey,
    origin: Option<Coordinate>,
) -> Vec<StationView> {
    let mut views: Vec<StationView> = stations
        .into_iter()
        .filter(|s| matches(s, filter))
        .map(|station| {
            let distance_km = match (origin, station.coordinate()) {
                (Some(from), Some(to)) => Some(haversine_km(from, to)),
                _ => None,
            };
            StationView {
                station,
                distance_km,
            }
        })
        .collect();

    views.sort_by(|a, b| compare(a, b, sort));
    views
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::{OwnerContact, Slot, SlotStatus};
    use chrono::Utc;

    fn station(
        name: &str,
        city: &str,
        coords: Option<(f64, f64)>,
        available: usize,
        total: usize,
        fast: bool,
        hours: &str,
    ) -> Station {
        let slots = (0..total)
            .map(|i| {
                let mut slot = Slot::new(
                    i as i32 + 1,
                    if fast {
                        ChargerType::Fast
                    } else {
                        ChargerType::Standard
                    },
                );
                if i >= available {
                    slot.status = SlotStatus::Occupied;
                }
                slot
            })
            .collect();
        Station {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            address: "Main Road".into(),
            city: city.into(),
            state: "Delhi".into(),
            zip_code: "110001".into(),
            phone: None,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            operating_hours: hours.into(),
            pricing: None,
            amenities: vec![],
            owner: OwnerContact::default(),
            slots,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn available_now_excludes_full_stations() {
        let stations = vec![
            station("Full House", "New Delhi", None, 0, 4, false, "24/7"),
            station("Open Spot", "New Delhi", None, 2, 4, false, "24/7"),
        ];
        let filter = StationFilter {
            available_now: true,
            ..Default::default()
        };
        let views = filter_and_sort(stations, &filter, SortKey::Name, None);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].station.name, "Open Spot");
    }

    #[test]
    fn availability_ratio_sort_order() {
        // {A: 2/10, B: 6/12, C: 4/6} -> [C (0.667), B (0.5), A (0.2)]
        let stations = vec![
            station("A", "X", None, 2, 10, false, "24/7"),
            station("B", "Y", None, 6, 12, false, "24/7"),
            station("C", "Z", None, 4, 6, false, "24/7"),
        ];
        let views = filter_and_sort(
            stations,
            &StationFilter::default(),
            SortKey::Availability,
            None,
        );
        let names: Vec<&str> = views.iter().map(|v| v.station.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn distance_sort_puts_unlocated_last() {
        let stations = vec![
            station("No Coords", "New Delhi", None, 1, 1, false, "24/7"),
            station(
                "Far",
                "Mumbai",
                Some((19.0760, 72.8777)),
                1,
                1,
                false,
                "24/7",
            ),
            station(
                "Near",
                "New Delhi",
                Some((28.6315, 77.2167)),
                1,
                1,
                false,
                "24/7",
            ),
        ];
        let origin = Some(Coordinate::new(28.6139, 77.2090));
        let views = filter_and_sort(stations, &StationFilter::default(), SortKey::Distance, origin);
        let names: Vec<&str> = views.iter().map(|v| v.station.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Far", "No Coords"]);
        assert!(views[0].formatted_distance().unwrap().ends_with(" km"));
        assert!(views[2].formatted_distance().is_none());
    }

    #[test]
    fn combined_filters_equal_intersection() {
        let stations = vec![
            station("A", "New Delhi", None, 2, 4, true, "24/7"),
            station("B", "New Delhi", None, 0, 4, true, "24/7"),
            station("C", "Mumbai", None, 2, 4, true, "24/7"),
            station("D", "New Delhi", None, 2, 4, false, "8-20"),
        ];

        let combined = StationFilter {
            location: Some("New Delhi".into()),
            available_now: true,
            open_24_7: true,
            ..Default::default()
        };

        let combined_ids: Vec<String> =
            filter_and_sort(stations.clone(), &combined, SortKey::Name, None)
                .into_iter()
                .map(|v| v.station.id)
                .collect();

        // Intersection of the three individual filters.
        let individual = [
            StationFilter {
                location: Some("New Delhi".into()),
                ..Default::default()
            },
            StationFilter {
                available_now: true,
                ..Default::default()
            },
            StationFilter {
                open_24_7: true,
                ..Default::default()
            },
        ];
        let intersection: Vec<String> = stations
            .iter()
            .filter(|s| individual.iter().all(|f| matches(s, f)))
            .map(|s| s.id.clone())
            .collect();

        assert_eq!(combined_ids, intersection);
        assert_eq!(combined_ids, vec!["a".to_string()]);
    }

    #[test]
    fn search_matches_name_address_city_state() {
        let stations = vec![
            station("Delhi EV Hub", "New Delhi", None, 1, 1, false, "24/7"),
            station("Powergrid", "Mumbai", None, 1, 1, false, "24/7"),
        ];
        let filter = StationFilter {
            search: Some("delhi".into()),
            ..Default::default()
        };
        let views = filter_and_sort(stations, &filter, SortKey::Name, None);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].station.name, "Delhi EV Hub");
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let stations = vec![station("A", "X", None, 1, 1, false, "24/7")];
        let filter = StationFilter {
            location: Some("Nowhere".into()),
            ..Default::default()
        };
        let views = filter_and_sort(stations, &filter, SortKey::Name, None);
        assert!(views.is_empty());
    }
}
