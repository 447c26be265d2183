use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use super::validation::ActorValidationError;

/// One entry of an actor roster as submitted by the host application.
///
/// An entry either references a linked identity (`person_id`) or carries the
/// full set of external identity values. `id` is set when the entry updates
/// an actor that already belongs to the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ActorInput {
    pub id: Option<Uuid>,
    pub person_id: Option<Uuid>,

    #[validate(length(max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub last_name: String,
    #[validate(length(max = 255), custom(function = "validate_optional_email"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub language: String,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 255))]
    pub institute: String,
    #[validate(length(max = 255))]
    pub city: String,
    /// ISO 3166-1 alpha-2 code
    #[validate(length(max = 2))]
    pub country: String,

    pub comment: String,
    /// Attachment store reference of the signed PDF, if any
    pub pdf_file: Option<Uuid>,
}

impl ActorInput {
    pub fn linked(person_id: Uuid) -> Self {
        Self {
            person_id: Some(person_id),
            ..Default::default()
        }
    }

    /// Format checks (lengths, e-mail syntax) flattened into actor errors.
    ///
    /// The identity invariant itself is checked on the persistence model.
    pub fn format_errors(&self) -> Vec<ActorValidationError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => flatten_errors(&errors),
        }
    }
}

fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Enter a valid e-mail address".into()))
    }
}

fn flatten_errors(errors: &ValidationErrors) -> Vec<ActorValidationError> {
    let mut flattened = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            flattened.push(ActorValidationError::InvalidField {
                field: field.to_string(),
                message,
            });
        }
    }
    flattened.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    flattened
}
