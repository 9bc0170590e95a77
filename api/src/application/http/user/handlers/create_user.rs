use axum::extract::State;
use devcamper_core::domain::user::{entities::User, ports::UserService};

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::{DataResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
    user::validators::CreateUserValidator,
};

#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    summary = "Create user",
    request_body = CreateUserValidator,
    responses(
        (status = 201, body = DataResponse<User>),
        (status = 400, description = "Invalid body or duplicate email")
    ),
)]
pub async fn create_user<S: ApiService>(
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<CreateUserValidator>,
) -> Result<Response<DataResponse<User>>, ApiError> {
    let user = state
        .service
        .create_user(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(DataResponse::new(user)))
}
