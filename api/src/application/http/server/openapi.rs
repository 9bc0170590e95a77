use crate::application::http::{
    bootcamp::router::BootcampApiDoc, course::router::CourseApiDoc, health::__path_health,
    review::router::ReviewApiDoc, user::router::UserApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevCamper API",
        description = "Bootcamps, courses, reviews and users."
    ),
    paths(health),
    nest(
        (path = "/api/v1", api = BootcampApiDoc),
        (path = "/api/v1", api = CourseApiDoc),
        (path = "/api/v1", api = ReviewApiDoc),
        (path = "/api/v1", api = UserApiDoc),
    )
)]
pub struct ApiDoc;
