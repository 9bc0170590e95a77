use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::{entities::Bootcamp, ports::BootcampService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    get,
    path = "/bootcamps/{id}",
    tag = "bootcamp",
    summary = "Get bootcamp",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    responses(
        (status = 200, body = DataResponse<Bootcamp>),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn get_bootcamp<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<Bootcamp>>, ApiError> {
    let bootcamp = state
        .service
        .get_bootcamp(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(bootcamp)))
}
