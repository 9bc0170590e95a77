use super::handlers::create_bootcamp::{__path_create_bootcamp, create_bootcamp};
use super::handlers::delete_bootcamp::{__path_delete_bootcamp, delete_bootcamp};
use super::handlers::get_bootcamp::{__path_get_bootcamp, get_bootcamp};
use super::handlers::get_bootcamps::{__path_get_bootcamps, get_bootcamps};
use super::handlers::get_bootcamps_in_radius::{
    __path_get_bootcamps_in_radius, get_bootcamps_in_radius,
};
use super::handlers::update_bootcamp::{__path_update_bootcamp, update_bootcamp};
use crate::application::http::server::app_state::{ApiService, AppState};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_bootcamps,
    get_bootcamp,
    create_bootcamp,
    update_bootcamp,
    delete_bootcamp,
    get_bootcamps_in_radius
))]
pub struct BootcampApiDoc;

pub fn bootcamp_routes<S: ApiService>(state: AppState<S>) -> Router<AppState<S>> {
    let base = format!("{}/api/v1/bootcamps", state.args.server.root_path);

    Router::new()
        .route(&base, get(get_bootcamps::<S>).post(create_bootcamp::<S>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_bootcamp::<S>)
                .put(update_bootcamp::<S>)
                .delete(delete_bootcamp::<S>),
        )
        .route(
            &format!("{base}/radius/{{zipcode}}/{{distance}}"),
            get(get_bootcamps_in_radius::<S>),
        )
}
