use axum::extract::{Path, State};
use devcamper_core::domain::course::ports::CourseService;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Empty, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "course",
    summary = "Delete course",
    params(
        ("id" = String, Path, description = "Course id"),
    ),
    responses(
        (status = 200, body = DataResponse<Empty>),
        (status = 404, description = "Course not found")
    ),
)]
pub async fn delete_course<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<Empty>>, ApiError> {
    state
        .service
        .delete_course(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(Empty::default())))
}
