use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Logical identity fields of an actor.
///
/// External actors carry these values in their own columns, linked actors
/// read them from the linked identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    FirstName,
    LastName,
    Email,
    Language,
    BirthDate,
    Institute,
    City,
    Country,
}

impl IdentityField {
    pub const ALL: [IdentityField; 8] = [
        IdentityField::FirstName,
        IdentityField::LastName,
        IdentityField::Email,
        IdentityField::Language,
        IdentityField::BirthDate,
        IdentityField::Institute,
        IdentityField::City,
        IdentityField::Country,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IdentityField::FirstName => "first_name",
            IdentityField::LastName => "last_name",
            IdentityField::Email => "email",
            IdentityField::Language => "language",
            IdentityField::BirthDate => "birth_date",
            IdentityField::Institute => "institute",
            IdentityField::City => "city",
            IdentityField::Country => "country",
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rejection of a single actor entry
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ActorValidationError {
    #[error("Actor must have external data or person set")]
    DataRequired,

    #[error("Actor can't have both external data and a person set")]
    ConflictingIdentity,

    #[error("External data is incomplete, missing: {}", join_fields(.missing))]
    IncompleteExternalData { missing: Vec<IdentityField> },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Person {person_id} does not exist")]
    UnknownPerson { person_id: Uuid },
}

impl ActorValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ActorValidationError::DataRequired => "ACTOR_DATA_REQUIRED",
            ActorValidationError::ConflictingIdentity => "ACTOR_CONFLICTING_IDENTITY",
            ActorValidationError::IncompleteExternalData { .. } => "ACTOR_INCOMPLETE_EXTERNAL_DATA",
            ActorValidationError::InvalidField { .. } => "ACTOR_INVALID_FIELD",
            ActorValidationError::UnknownPerson { .. } => "ACTOR_UNKNOWN_PERSON",
        }
    }
}

fn join_fields(fields: &[IdentityField]) -> String {
    fields
        .iter()
        .map(IdentityField::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error on one field of the parent entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors attached to one row of a submitted roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRowError {
    pub row: usize,
    pub errors: Vec<ActorValidationError>,
}

/// Errors on the roster as a whole
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RosterError {
    #[error("Please submit at least {min} actor(s), got {actual}")]
    MinActors { min: usize, actual: usize },

    #[error("Row {row} references actor {actor_id} which is not part of this process")]
    UnknownActor { row: usize, actor_id: Uuid },
}

impl RosterError {
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::MinActors { .. } => "ROSTER_MIN_ACTORS",
            RosterError::UnknownActor { .. } => "ROSTER_UNKNOWN_ACTOR",
        }
    }
}

/// Everything wrong with a parent + roster submission, grouped for re-display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitErrors {
    pub parent: Vec<FieldError>,
    pub actors: Vec<ActorRowError>,
    pub roster: Vec<RosterError>,
}

impl SubmitErrors {
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty() && self.actors.is_empty() && self.roster.is_empty()
    }

    pub fn push_actor_errors(&mut self, row: usize, errors: Vec<ActorValidationError>) {
        if !errors.is_empty() {
            self.actors.push(ActorRowError { row, errors });
        }
    }

    /// Returns `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), SubmitErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for SubmitErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        for error in &self.parent {
            parts.push(format!("{}: {}", error.field, error.message));
        }
        for row in &self.actors {
            for error in &row.errors {
                parts.push(format!("actor #{}: {}", row.row, error));
            }
        }
        for error in &self.roster {
            parts.push(error.to_string());
        }
        write!(f, "{}", parts.join("; "))
    }
}
