use devcamper_core::domain::user::{
    entities::Role,
    value_objects::{CreateUserInput, UpdateUserInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,

    #[serde(default)]
    pub role: Option<Role>,
}

impl From<CreateUserValidator> for CreateUserInput {
    fn from(payload: CreateUserValidator) -> Self {
        CreateUserInput {
            name: payload.name,
            email: payload.email,
            role: payload.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

impl From<UpdateUserValidator> for UpdateUserInput {
    fn from(payload: UpdateUserValidator) -> Self {
        UpdateUserInput {
            name: payload.name,
            email: payload.email,
            role: payload.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_user_requires_valid_email() {
        let payload: CreateUserValidator =
            serde_json::from_value(json!({"name": "Jane", "email": "jane"})).unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_role_is_optional_and_lowercase() {
        let payload: CreateUserValidator = serde_json::from_value(json!({
            "name": "Jane",
            "email": "jane@gmail.com",
            "role": "publisher"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(CreateUserInput::from(payload).role, Some(Role::Publisher));
    }
}
