use super::handlers::get_reviews::{
    __path_get_bootcamp_reviews, __path_get_reviews, get_bootcamp_reviews, get_reviews,
};
use crate::application::http::server::app_state::{ApiService, AppState};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_reviews, get_bootcamp_reviews))]
pub struct ReviewApiDoc;

pub fn review_routes<S: ApiService>(state: AppState<S>) -> Router<AppState<S>> {
    let root = format!("{}/api/v1", state.args.server.root_path);

    Router::new()
        .route(&format!("{root}/reviews"), get(get_reviews::<S>))
        .route(
            &format!("{root}/bootcamps/{{id}}/reviews"),
            get(get_bootcamp_reviews::<S>),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::application::http::server::testing::{create_bootcamp, server};

    #[tokio::test]
    async fn test_nested_reviews_of_unknown_bootcamp_is_not_found() {
        server()
            .get(&format!("/api/v1/bootcamps/{}/reviews", Uuid::new_v4()))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_nested_reviews_of_existing_bootcamp_is_empty_listing() {
        let server = server();
        let id = create_bootcamp(&server, "Devworks Bootcamp").await;

        let response = server.get(&format!("/api/v1/bootcamps/{id}/reviews")).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "count": 0,
            "pagination": {},
            "data": [],
        }));
        assert_eq!(
            server.get("/api/v1/reviews").await.json::<Value>()["count"],
            json!(0)
        );
    }
}
