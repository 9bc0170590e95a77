use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use devcamper_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Server Error")]
    InternalServerError,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound(_) => ApiError::NotFound(error.to_string()),
            CoreError::Validation { .. } | CoreError::DuplicateField | CoreError::Geocode(_) => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::ExternalServiceError(_) | CoreError::InternalServerError => {
                ApiError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// A path id that is not a UUID cannot name any resource.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| CoreError::NotFound(raw.to_string()).into())
}

/// JSON body that must also pass its `validator` rules.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(validation_message(&errors)))?;

        Ok(ValidateJson(value))
    }
}

/// Every failed rule's message, ordered by field.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Please add a name"))]
        name: String,
        #[validate(email(message = "Please add a valid email"))]
        email: String,
    }

    async fn echo(ValidateJson(payload): ValidateJson<Payload>) -> String {
        payload.name
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/", post(echo))).unwrap()
    }

    #[test]
    fn test_core_errors_map_to_status() {
        assert_eq!(
            ApiError::from(CoreError::NotFound("42".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::DuplicateField),
            ApiError::BadRequest("Duplicate field value entered".to_string())
        );
        assert_eq!(
            ApiError::from(CoreError::validation("averageCost", "abc")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::Geocode("00000".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::ExternalServiceError("timeout".to_string())).to_string(),
            "Server Error"
        );
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert_eq!(
            parse_id("5d713995b721c3bb38c1f5d0"),
            Err(ApiError::NotFound(
                "Resource not found with id of 5d713995b721c3bb38c1f5d0".to_string()
            ))
        );
        assert!(parse_id("018f2a4e-6a3b-7c1d-9e2f-0123456789ab").is_ok());
    }

    #[tokio::test]
    async fn test_validate_json_joins_messages() {
        let response = server()
            .post("/")
            .json(&json!({"name": "", "email": "nope"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "success": false,
            "error": "Please add a valid email, Please add a name"
        }));
    }

    #[tokio::test]
    async fn test_validate_json_passes_valid_body() {
        let response = server()
            .post("/")
            .json(&json!({"name": "Jane", "email": "jane@gmail.com"}))
            .await;

        response.assert_status_ok();
        response.assert_text("Jane");
    }
}
