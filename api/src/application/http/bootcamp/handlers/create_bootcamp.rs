use axum::extract::State;
use devcamper_core::domain::bootcamp::{entities::Bootcamp, ports::BootcampService};

use crate::application::http::{
    bootcamp::validators::CreateBootcampValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::{DataResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
};

#[utoipa::path(
    post,
    path = "/bootcamps",
    tag = "bootcamp",
    summary = "Create bootcamp",
    description = "Creates a bootcamp. The address is geocoded into its location.",
    request_body = CreateBootcampValidator,
    responses(
        (status = 201, body = DataResponse<Bootcamp>),
        (status = 400, description = "Invalid body, duplicate name or ungeocodable address")
    ),
)]
pub async fn create_bootcamp<S: ApiService>(
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<CreateBootcampValidator>,
) -> Result<Response<DataResponse<Bootcamp>>, ApiError> {
    let bootcamp = state
        .service
        .create_bootcamp(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(DataResponse::new(bootcamp)))
}
