use axum::extract::{Path, State};
use devcamper_core::domain::course::ports::CourseService;

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
    path = "/courses",
    tag = "course",
    summary = "Get courses",
    description = "Lists courses with their bootcamp's name and description inlined.",
    responses(
        (status = 200, body = DocumentsResponse)
    ),
)]
pub async fn get_courses<S: ApiService>(
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_courses(spec, None)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/bootcamps/{id}/courses",
    tag = "course",
    summary = "Get courses of a bootcamp",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    responses(
        (status = 200, body = DocumentsResponse),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn get_bootcamp_courses<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_courses(spec, Some(parse_id(&id)?))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}
