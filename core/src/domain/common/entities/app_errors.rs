use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Resource not found with id of {0}")]
    NotFound(String),

    #[error("Invalid value '{value}' for field '{field}'")]
    Validation { field: String, value: String },

    #[error("Duplicate field value entered")]
    DuplicateField,

    #[error("Could not geocode '{0}'")]
    Geocode(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn validation(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.into(),
        }
    }
}
