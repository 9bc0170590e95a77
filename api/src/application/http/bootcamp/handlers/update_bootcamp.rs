use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::{entities::Bootcamp, ports::BootcampService};

use crate::application::http::{
    bootcamp::validators::UpdateBootcampValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson, parse_id},
            response::{DataResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
};

#[utoipa::path(
    put,
    path = "/bootcamps/{id}",
    tag = "bootcamp",
    summary = "Update bootcamp",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    request_body = UpdateBootcampValidator,
    responses(
        (status = 200, body = DataResponse<Bootcamp>),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn update_bootcamp<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<UpdateBootcampValidator>,
) -> Result<Response<DataResponse<Bootcamp>>, ApiError> {
    let bootcamp = state
        .service
        .update_bootcamp(parse_id(&id)?, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(bootcamp)))
}
