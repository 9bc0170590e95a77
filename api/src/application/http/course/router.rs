use super::handlers::add_course::{__path_add_course, add_course};
use super::handlers::delete_course::{__path_delete_course, delete_course};
use super::handlers::get_course::{__path_get_course, get_course};
use super::handlers::get_courses::{
    __path_get_bootcamp_courses, __path_get_courses, get_bootcamp_courses, get_courses,
};
use super::handlers::update_course::{__path_update_course, update_course};
use crate::application::http::server::app_state::{ApiService, AppState};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_courses,
    get_bootcamp_courses,
    get_course,
    add_course,
    update_course,
    delete_course
))]
pub struct CourseApiDoc;

pub fn course_routes<S: ApiService>(state: AppState<S>) -> Router<AppState<S>> {
    let root = format!("{}/api/v1", state.args.server.root_path);

    Router::new()
        .route(&format!("{root}/courses"), get(get_courses::<S>))
        .route(
            &format!("{root}/courses/{{id}}"),
            get(get_course::<S>).put(update_course::<S>).delete(delete_course::<S>),
        )
        .route(
            &format!("{root}/bootcamps/{{id}}/courses"),
            get(get_bootcamp_courses::<S>).post(add_course::<S>),
        )
}
