use axum::extract::{Path, State};
use devcamper_core::domain::course::{entities::Course, ports::CourseService};

use crate::application::http::{
    course::validators::UpdateCourseValidator,
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
    path = "/courses/{id}",
    tag = "course",
    summary = "Update course",
    params(
        ("id" = String, Path, description = "Course id"),
    ),
    request_body = UpdateCourseValidator,
    responses(
        (status = 200, body = DataResponse<Course>),
        (status = 404, description = "Course not found")
    ),
)]
pub async fn update_course<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<UpdateCourseValidator>,
) -> Result<Response<DataResponse<Course>>, ApiError> {
    let course = state
        .service
        .update_course(parse_id(&id)?, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DataResponse::new(course)))
}
