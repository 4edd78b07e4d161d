//! Geographic helpers: coordinates and great-circle distance.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle (haversine) distance between two coordinates, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Format a distance the way clients display it: one decimal, "km" suffix.
pub fn format_distance_km(km: f64) -> String {
    format!("{:.1} km", km)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_DELHI: Coordinate = Coordinate {
        latitude: 28.6139,
        longitude: 77.2090,
    };
    const MUMBAI: Coordinate = Coordinate {
        latitude: 19.0760,
        longitude: 72.8777,
    };
    const BANGALORE: Coordinate = Coordinate {
        latitude: 12.9716,
        longitude: 77.5946,
    };

    #[test]
    fn zero_distance_to_self() {
        let d = haversine_km(NEW_DELHI, NEW_DELHI);
        assert_eq!(format_distance_km(d), "0.0 km");
    }

    #[test]
    fn delhi_to_mumbai_matches_great_circle() {
        // Standard great-circle value for this pair is ~1153 km.
        let d = haversine_km(NEW_DELHI, MUMBAI);
        assert!((d - 1153.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn delhi_to_bangalore_matches_great_circle() {
        // ~1740 km.
        let d = haversine_km(NEW_DELHI, BANGALORE);
        assert!((d - 1740.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(NEW_DELHI, MUMBAI);
        let ba = haversine_km(MUMBAI, NEW_DELHI);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn formatting_rounds_to_one_decimal() {
        assert_eq!(format_distance_km(0.84999), "0.8 km");
        assert_eq!(format_distance_km(1153.26), "1153.3 km");
    }
}
