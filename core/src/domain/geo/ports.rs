use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, geo::entities::GeocodeResult};

/// Port for address lookups (MapQuest, ...)
#[cfg_attr(test, mockall::automock)]
pub trait Geocoder: Send + Sync {
    /// Candidates for `address`, best match first. May be empty.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeResult>, CoreError>> + Send;
}
