use axum::extract::{Path, State};
use devcamper_core::domain::review::ports::ReviewService;

use crate::application::http::{
    query_extractor::QuerySpecExtractor,
    server::{
        api_entities::{
            api_error::{ApiError, parse_id},
            response::{DocumentsResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
};

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "review",
    summary = "Get reviews",
    responses(
        (status = 200, body = DocumentsResponse)
    ),
)]
pub async fn get_reviews<S: ApiService>(
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_reviews(spec, None)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/bootcamps/{id}/reviews",
    tag = "review",
    summary = "Get reviews of a bootcamp",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    responses(
        (status = 200, body = DocumentsResponse),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn get_bootcamp_reviews<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_reviews(spec, Some(parse_id(&id)?))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}
