use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

pub mod postgres;

/// Logs a database failure that has no meaning for the caller.
pub(crate) fn db_error(action: &str, e: DbErr) -> CoreError {
    error!("Failed to {}: {}", action, e);
    CoreError::InternalServerError
}

/// Maps a failed insert or update, surfacing unique violations and missing rows.
pub(crate) fn write_error(action: &str, id: impl ToString, e: DbErr) -> CoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
        error!("Failed to {}, duplicate value: {}", action, detail);
        return CoreError::DuplicateField;
    }

    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => CoreError::NotFound(id.to_string()),
        e => {
            error!("Failed to {}: {}", action, e);
            CoreError::InternalServerError
        }
    }
}
