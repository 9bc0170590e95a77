use axum::extract::{Path, State};
use devcamper_core::domain::{
    bootcamp::ports::BootcampService, common::entities::app_errors::CoreError,
};

use crate::application::http::server::{
    api_entities::{
        api_error::ApiError,
        response::{DocumentsResponse, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    get,
    path = "/bootcamps/radius/{zipcode}/{distance}",
    tag = "bootcamp",
    summary = "Get bootcamps within a radius",
    description = "Every bootcamp within `distance` miles of the zipcode, unpaginated.",
    params(
        ("zipcode" = String, Path, description = "Zipcode at the center"),
        ("distance" = f64, Path, description = "Radius in miles"),
    ),
    responses(
        (status = 200, body = DocumentsResponse),
        (status = 400, description = "Invalid distance or ungeocodable zipcode")
    ),
)]
pub async fn get_bootcamps_in_radius<S: ApiService>(
    Path((zipcode, distance)): Path<(String, String)>,
    State(state): State<AppState<S>>,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let miles: f64 = distance
        .parse()
        .map_err(|_| CoreError::validation("distance", distance.as_str()))?;

    let page = state
        .service
        .get_bootcamps_in_radius(zipcode, miles)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}
