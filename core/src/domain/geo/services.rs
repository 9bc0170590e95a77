use tracing::{debug, instrument};

use crate::domain::{
    common::entities::app_errors::CoreError,
    geo::{
        entities::{GeocodeResult, SphericalCap},
        ports::Geocoder,
    },
    query::entities::FilterExpression,
};

/// Document field holding the GeoJSON point.
pub const LOCATION_FIELD: &str = "location";

/// First geocoding candidate for `address`, or `CoreError::Geocode` when there is none.
pub async fn geocode_first<G: Geocoder>(
    geocoder: &G,
    address: &str,
) -> Result<GeocodeResult, CoreError> {
    geocoder
        .geocode(address)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Geocode(address.to_string()))
}

/// Filter matching every document whose location lies within `distance_miles` of `zipcode`.
#[instrument(skip(geocoder))]
pub async fn radius_filter<G: Geocoder>(
    zipcode: &str,
    distance_miles: f64,
    geocoder: &G,
) -> Result<FilterExpression, CoreError> {
    if !distance_miles.is_finite() || distance_miles < 0.0 {
        return Err(CoreError::validation("distance", distance_miles.to_string()));
    }

    let center = geocode_first(geocoder, zipcode).await?;
    let cap = SphericalCap::from_miles(center.longitude, center.latitude, distance_miles);

    debug!(
        longitude = cap.longitude,
        latitude = cap.latitude,
        radius = cap.radius,
        "built radius filter"
    );

    Ok(FilterExpression::new().within_sphere(LOCATION_FIELD, cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{geo::ports::MockGeocoder, query::entities::FieldFilter};

    fn boston() -> GeocodeResult {
        GeocodeResult {
            latitude: 42.36,
            longitude: -71.06,
            formatted_address: "Boston, MA 02108, US".to_string(),
            street: None,
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            zipcode: Some("02108".to_string()),
            country: Some("US".to_string()),
        }
    }

    #[tokio::test]
    async fn test_radius_filter_centers_on_first_result() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .withf(|address| address.to_string() == "02108")
            .times(1)
            .returning(|_| Box::pin(std::future::ready(Ok(vec![boston()]))));

        let filter = radius_filter("02108", 10.0, &geocoder).await.unwrap();

        assert_eq!(
            filter.get(LOCATION_FIELD),
            Some(&FieldFilter::WithinSphere(SphericalCap {
                longitude: -71.06,
                latitude: 42.36,
                radius: 10.0 / 3963.0,
            }))
        );
    }

    #[tokio::test]
    async fn test_radius_filter_no_results_is_geocode_error() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .returning(|_| Box::pin(std::future::ready(Ok(Vec::new()))));

        let err = radius_filter("00000", 10.0, &geocoder).await.unwrap_err();
        assert_eq!(err, CoreError::Geocode("00000".to_string()));
    }

    #[tokio::test]
    async fn test_radius_filter_rejects_negative_distance() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().never();

        let err = radius_filter("02108", -1.0, &geocoder).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "distance"));
    }
}
