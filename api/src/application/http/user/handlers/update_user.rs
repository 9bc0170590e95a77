use axum::extract::{Path, State};
use devcamper_core::domain::user::{entities::User, ports::UserService};

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson, parse_id},
            response::{DataResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
    user::validators::UpdateUserValidator,
};

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "user",
    summary = "Update user",
    params(
        ("id" = String, Path, description = "User id"),
    ),
    request_body = UpdateUserValidator,
    responses(
        (status = 200, body = DataResponse<User>),
        (status = 404, description = "User not found")
    ),
)]
pub async fn update_user<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<UpdateUserValidator>,
) -> Result<Response<DataResponse<User>>, ApiError> {
    let user = state
        .service
        .update_user(parse_id(&id)?, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(user)))
}
