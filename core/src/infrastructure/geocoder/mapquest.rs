use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::{
    common::{GeocoderConfig, entities::app_errors::CoreError},
    geo::{entities::GeocodeResult, ports::Geocoder},
};

pub const DEFAULT_MAPQUEST_URL: &str = "https://www.mapquestapi.com";

/// Geocoder backed by the MapQuest geocoding API.
#[derive(Debug, Clone)]
pub struct MapQuestGeocoder {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MapQuestResponse {
    #[serde(default)]
    results: Vec<MapQuestResult>,
}

#[derive(Debug, Deserialize)]
struct MapQuestResult {
    #[serde(default)]
    locations: Vec<MapQuestLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapQuestLocation {
    lat_lng: LatLng,
    #[serde(default)]
    street: String,
    /// city
    #[serde(default)]
    admin_area5: String,
    /// state
    #[serde(default)]
    admin_area3: String,
    /// country
    #[serde(default)]
    admin_area1: String,
    #[serde(default)]
    postal_code: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<MapQuestLocation> for GeocodeResult {
    fn from(location: MapQuestLocation) -> Self {
        let state_zip = [location.admin_area3.trim(), location.postal_code.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let formatted_address = [
            location.street.trim(),
            location.admin_area5.trim(),
            state_zip.as_str(),
            location.admin_area1.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            latitude: location.lat_lng.lat,
            longitude: location.lat_lng.lng,
            formatted_address,
            street: non_empty(location.street),
            city: non_empty(location.admin_area5),
            state: non_empty(location.admin_area3),
            zipcode: non_empty(location.postal_code),
            country: non_empty(location.admin_area1),
        }
    }
}

impl MapQuestGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl Geocoder for MapQuestGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, CoreError> {
        let url = format!("{}/geocoding/v1/address", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("location", address)])
            .send()
            .await
            .map_err(|e| {
                error!("MapQuest request failed: {}", e);
                CoreError::ExternalServiceError(format!("Geocoder error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("MapQuest error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Geocoder returned error: {}",
                status
            )));
        }

        let body: MapQuestResponse = response.json().await.map_err(|e| {
            error!("Failed to parse MapQuest response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse geocoder response: {}", e))
        })?;

        let results: Vec<GeocodeResult> = body
            .results
            .into_iter()
            .flat_map(|result| result.locations)
            .map(GeocodeResult::from)
            .collect();

        debug!(address, candidates = results.len(), "geocoded address");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapquest_response() {
        let body = r#"{
            "info": { "statuscode": 0 },
            "results": [{
                "providedLocation": { "location": "233 Bay State Rd Boston MA 02215" },
                "locations": [{
                    "street": "233 Bay State Rd",
                    "adminArea5": "Boston",
                    "adminArea3": "MA",
                    "adminArea1": "US",
                    "postalCode": "02215-1405",
                    "latLng": { "lat": 42.350846, "lng": -71.105734 }
                }]
            }]
        }"#;

        let response: MapQuestResponse = serde_json::from_str(body).unwrap();
        let results: Vec<GeocodeResult> = response
            .results
            .into_iter()
            .flat_map(|r| r.locations)
            .map(GeocodeResult::from)
            .collect();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.latitude, 42.350846);
        assert_eq!(result.longitude, -71.105734);
        assert_eq!(
            result.formatted_address,
            "233 Bay State Rd, Boston, MA 02215-1405, US"
        );
        assert_eq!(result.city.as_deref(), Some("Boston"));
        assert_eq!(result.zipcode.as_deref(), Some("02215-1405"));
    }

    #[test]
    fn test_missing_parts_are_none() {
        let body = r#"{ "results": [{ "locations": [{
            "adminArea1": "US", "postalCode": "02108",
            "latLng": { "lat": 42.36, "lng": -71.06 }
        }] }] }"#;

        let response: MapQuestResponse = serde_json::from_str(body).unwrap();
        let location = response
            .results
            .into_iter()
            .flat_map(|r| r.locations)
            .next()
            .unwrap();
        let result = GeocodeResult::from(location);

        assert_eq!(result.street, None);
        assert_eq!(result.formatted_address, "02108, US");
        assert_eq!(result.zipcode.as_deref(), Some("02108"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let geocoder = MapQuestGeocoder::new(GeocoderConfig {
            api_key: "key".to_string(),
            base_url: "http://localhost:8080/".to_string(),
        });
        assert_eq!(geocoder.base_url, "http://localhost:8080");
    }
}
