use super::handlers::create_user::{__path_create_user, create_user};
use super::handlers::delete_user::{__path_delete_user, delete_user};
use super::handlers::get_user::{__path_get_user, get_user};
use super::handlers::get_users::{__path_get_users, get_users};
use super::handlers::update_user::{__path_update_user, update_user};
use crate::application::http::server::app_state::{ApiService, AppState};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_users, get_user, create_user, update_user, delete_user))]
pub struct UserApiDoc;

pub fn user_routes<S: ApiService>(state: AppState<S>) -> Router<AppState<S>> {
    let base = format!("{}/api/v1/users", state.args.server.root_path);

    Router::new()
        .route(&base, get(get_users::<S>).post(create_user::<S>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_user::<S>).put(update_user::<S>).delete(delete_user::<S>),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::application::http::server::testing::server;

    #[tokio::test]
    async fn test_duplicate_email_is_bad_request() {
        let server = server();
        let user = json!({"name": "John Doe", "email": "john@gmail.com"});

        server
            .post("/api/v1/users")
            .json(&user)
            .await
            .assert_status(StatusCode::CREATED);

        let duplicate = server
            .post("/api/v1/users")
            .json(&user)
            .expect_failure()
            .await;
        duplicate.assert_status(StatusCode::BAD_REQUEST);
        duplicate.assert_json(&json!({
            "success": false,
            "error": "Duplicate field value entered",
        }));

        let users = server.get("/api/v1/users").await.json::<Value>();
        assert_eq!(users["count"], json!(1));
        assert_eq!(users["data"][0]["role"], json!("user"));
    }
}
