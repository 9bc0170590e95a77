use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Earth radius used to turn a distance in miles into radians.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// All points within `radius` radians of (`longitude`, `latitude`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SphericalCap {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
}

impl SphericalCap {
    pub fn from_miles(longitude: f64, latitude: f64, distance_miles: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius: distance_miles / EARTH_RADIUS_MILES,
        }
    }

    /// Central angle in radians between the center and a point (haversine).
    pub fn angle_to(&self, longitude: f64, latitude: f64) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * h.sqrt().min(1.0).asin()
    }

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        self.angle_to(longitude, latitude) <= self.radius
    }
}

/// One candidate returned by a geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_miles() {
        let cap = SphericalCap::from_miles(-71.06, 42.36, 10.0);
        assert_eq!(cap.radius, 10.0 / 3963.0);
    }

    #[test]
    fn test_contains() {
        // Boston center, Cambridge about 3 miles away, Worcester about 40 miles away
        let cap = SphericalCap::from_miles(-71.06, 42.36, 10.0);
        assert!(cap.contains(-71.06, 42.36));
        assert!(cap.contains(-71.1097, 42.3736));
        assert!(!cap.contains(-71.8023, 42.2626));
    }
}
