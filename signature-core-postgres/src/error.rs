//! Translation of repository errors into the api error taxonomy.

use signature_core_api::ApiError;
use std::error::Error;

/// Maps a boxed repository error to an [`ApiError`].
///
/// Database errors naming a constraint become `ConstraintViolation`: they
/// mean an invalid write got past validation. Errors that already are an
/// `ApiError` pass through unchanged.
pub fn map_repo_error(error: Box<dyn Error + Send + Sync>) -> ApiError {
    let error = match error.downcast::<ApiError>() {
        Ok(api_error) => return *api_error,
        Err(other) => other,
    };
    match error.downcast::<sqlx::Error>() {
        Ok(sqlx_error) => map_sqlx_error(*sqlx_error),
        Err(other) => ApiError::InternalError(other.to_string()),
    }
}

pub fn map_sqlx_error(error: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_error) = &error {
        if let Some(constraint) = db_error.constraint() {
            return ApiError::ConstraintViolation {
                constraint: constraint.to_string(),
                message: db_error.message().to_string(),
            };
        }
    }
    ApiError::DatabaseError(error.to_string())
}
