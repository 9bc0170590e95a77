use axum::extract::{Path, State};
use devcamper_core::domain::user::{entities::User, ports::UserService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "user",
    summary = "Get user",
    params(
        ("id" = String, Path, description = "User id"),
    ),
    responses(
        (status = 200, body = DataResponse<User>),
        (status = 404, description = "User not found")
    ),
)]
pub async fn get_user<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<User>>, ApiError> {
    let user = state
        .service
        .get_user(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(user)))
}
