use axum::extract::{Path, State};
use devcamper_core::domain::course::{entities::CourseDetails, ports::CourseService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, parse_id},
        response::{DataResponse, Response},
    },
    app_state::{ApiService, AppState},
};

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "course",
    summary = "Get course",
    params(
        ("id" = String, Path, description = "Course id"),
    ),
    responses(
        (status = 200, body = DataResponse<CourseDetails>),
        (status = 404, description = "Course not found")
    ),
)]
pub async fn get_course<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Response<DataResponse<CourseDetails>>, ApiError> {
    let course = state
        .service
        .get_course(parse_id(&id)?)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(course)))
}
