use axum::extract::State;
use devcamper_core::domain::bootcamp::ports::BootcampService;

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
    path = "/bootcamps",
    tag = "bootcamp",
    summary = "Get bootcamps",
    description = "Lists bootcamps. Any non-control query parameter filters by field, with \
                   `field[op]=value` for `gt`, `gte`, `lt`, `lte` and `in`. `select`, `sort`, \
                   `page` and `limit` shape the result.",
    responses(
        (status = 200, body = DocumentsResponse),
        (status = 400, body = crate::application::http::server::api_entities::api_error::ErrorBody)
    ),
)]
pub async fn get_bootcamps<S: ApiService>(
    State(state): State<AppState<S>>,
    QuerySpecExtractor(spec): QuerySpecExtractor,
) -> Result<Response<DocumentsResponse>, ApiError> {
    let page = state
        .service
        .get_bootcamps(spec)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentsResponse::from(page)))
}
