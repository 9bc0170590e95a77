use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use clap::Parser;
use devcamper_core::{
    domain::{
        common::entities::app_errors::CoreError,
        geo::{entities::GeocodeResult, ports::Geocoder},
        query::services::QueryTranslator,
    },
    infrastructure::memory::MemoryService,
};
use serde_json::{Value, json};

use super::app_state::AppState;
use crate::application::http::{
    bootcamp::router::bootcamp_routes, course::router::course_routes,
    review::router::review_routes, user::router::user_routes,
};
use crate::args::Args;

/// Zipcode the test geocoder has no result for.
pub const UNKNOWN_ZIPCODE: &str = "00000";

/// Places every address in downtown Boston, except [`UNKNOWN_ZIPCODE`].
#[derive(Debug, Clone, Default)]
pub struct BostonGeocoder;

impl Geocoder for BostonGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, CoreError> {
        if address == UNKNOWN_ZIPCODE {
            return Ok(Vec::new());
        }

        Ok(vec![GeocodeResult {
            latitude: 42.36,
            longitude: -71.06,
            formatted_address: "233 Bay State Rd, Boston, MA 02215, US".to_string(),
            street: Some("233 Bay State Rd".to_string()),
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            zipcode: Some("02215".to_string()),
            country: Some("US".to_string()),
        }])
    }
}

pub type TestService = MemoryService<BostonGeocoder>;

/// Every resource router over empty in-memory stores, mounted at the default root path.
pub fn server() -> TestServer {
    let args = Args::parse_from(["devcamper-api", "--server-root-path", ""]);
    let state = AppState::new(
        Arc::new(args),
        TestService::in_memory(BostonGeocoder, QueryTranslator::default()),
    );

    let router = Router::new()
        .merge(bootcamp_routes(state.clone()))
        .merge(course_routes(state.clone()))
        .merge(review_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .with_state(state);

    TestServer::new(router).unwrap()
}

/// Creates a bootcamp through the API and returns its id.
pub async fn create_bootcamp(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/api/v1/bootcamps")
        .json(&json!({
            "name": name,
            "description": format!("{name} teaches full stack web development"),
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development", "Business"],
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
