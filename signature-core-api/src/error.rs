use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::SubmitErrors;

/// Deployment or programming errors. Never recoverable at request time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{parent} has no process link field. Declare one and set the process link name.")]
    MissingProcessLink { parent: &'static str },

    #[error("{parent} has more than one process link field ({candidates}). Set the process link name.")]
    AmbiguousProcessLink {
        parent: &'static str,
        candidates: String,
    },

    #[error("{parent} has no process link field named '{name}'")]
    UnknownProcessLink { parent: &'static str, name: String },

    #[error(
        "Signing submission carries no decision. The signing form needs 2 submit buttons named \
         'submitted' with the 'approved' and 'declined' values."
    )]
    MissingDecisionIndicator,

    #[error("Signing submission carries {0} decision indicators, expected exactly one")]
    AmbiguousDecision(usize),

    #[error("Unknown decision value '{0}', expected 'approved' or 'declined'")]
    UnknownDecision(String),

    #[error("Missing configuration value: {0}")]
    MissingValue(&'static str),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Validation error: {0}")]
    ValidationError(SubmitErrors),

    #[error("Constraint '{constraint}' rejected the write: {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Can't generate token: no state recorded for actor {0} yet")]
    NoHistory(Uuid),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<SubmitErrors> for ApiError {
    fn from(errors: SubmitErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
