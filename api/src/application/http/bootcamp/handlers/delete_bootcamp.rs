use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::ports::BootcampService;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Empty, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    delete,
    path = "/bootcamps/{id}",
    tag = "bootcamp",
    summary = "Delete bootcamp",
    description = "Deletes the bootcamp along with its courses and reviews.",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    responses(
        (status = 200, body = DataResponse<Empty>),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn delete_bootcamp<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<Empty>>, ApiError> {
    state
        .service
        .delete_bootcamp(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(Empty::default())))
}
