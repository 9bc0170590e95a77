use axum::extract::{Path, State};
use devcamper_core::domain::course::{entities::Course, ports::CourseService};

use crate::application::http::{
    course::validators::CreateCourseValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson, parse_id},
            response::{DataResponse, Response},
        },
        app_state::{ApiService, AppState},
    },
};

#[utoipa::path(
    post,
    path = "/bootcamps/{id}/courses",
    tag = "course",
    summary = "Add course",
    description = "Adds a course to the bootcamp and refreshes the bootcamp's average cost.",
    params(
        ("id" = String, Path, description = "Bootcamp id"),
    ),
    request_body = CreateCourseValidator,
    responses(
        (status = 201, body = DataResponse<Course>),
        (status = 404, description = "Bootcamp not found")
    ),
)]
pub async fn add_course<S: ApiService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    ValidateJson(payload): ValidateJson<CreateCourseValidator>,
) -> Result<Response<DataResponse<Course>>, ApiError> {
    let course = state
        .service
        .add_course(parse_id(&id)?, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(DataResponse::new(course)))
}
