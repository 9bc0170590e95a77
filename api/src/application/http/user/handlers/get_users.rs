use axum::extract::State;
use devcamper_core::domain::user::ports::UserService;

use crate::application::http::{
    query_extractor::QuerySpecExtractor,
    server::{
        api_entities::{
            api_error::ApiError,
            response::{DocumentsResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    summary = "Get users",
    responses(
        (status = 200, body = DocumentsResponse)
    ),
)]
pub async fn get_users<S: ApiService>(
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_users(spec)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}
