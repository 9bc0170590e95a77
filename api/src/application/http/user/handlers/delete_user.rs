use axum::extract::{Path, State};
use devcamper_core::domain::user::ports::UserService;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Empty, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "user",
    summary = "Delete user",
    description = "Deletes the user and every review they wrote.",
    params(
        ("id" = String, Path, description = "User id"),
    ),
    responses(
        (status = 200, body = DataResponse<Empty>),
        (status = 404, description = "User not found")
    ),
)]
pub async fn delete_user<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<Empty>>, ApiError> {
    state
        .service
        .delete_user(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(Empty::default())))
}
