//! Identity resolution for actors.
//!
//! Every read of a logical identity field goes through [`resolve_field`] (or
//! [`ResolvedIdentity::resolve`]), which picks the actor's own columns for
//! external actors and the linked identity record otherwise. Persistence code
//! reads the raw columns directly and never resolves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use signature_core_api::domain::{ActorValidationError, IdentityField};

use super::actor::ActorModel;
use super::linked_identity::LinkedIdentityModel;

/// Identity values of an actor, whatever their source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub language: String,
    pub birth_date: Option<NaiveDate>,
    pub institute: String,
    pub city: String,
    pub country: String,
}

impl ResolvedIdentity {
    /// `linked` is the record referenced by `actor.person_id`; it is ignored
    /// for external actors.
    pub fn resolve(actor: &ActorModel, linked: Option<&LinkedIdentityModel>) -> Self {
        Self {
            first_name: resolve_field(actor, linked, IdentityField::FirstName),
            last_name: resolve_field(actor, linked, IdentityField::LastName),
            email: resolve_field(actor, linked, IdentityField::Email),
            language: resolve_field(actor, linked, IdentityField::Language),
            birth_date: resolve_birth_date(actor, linked),
            institute: resolve_field(actor, linked, IdentityField::Institute),
            city: resolve_field(actor, linked, IdentityField::City),
            country: resolve_field(actor, linked, IdentityField::Country),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Value of one logical field as text; dates use `YYYY-MM-DD`.
///
/// A linked actor whose record is missing, or does not define the field,
/// resolves to an empty string.
pub fn resolve_field(
    actor: &ActorModel,
    linked: Option<&LinkedIdentityModel>,
    field: IdentityField,
) -> String {
    if actor.is_external() {
        return external_value(actor, field);
    }
    let Some(person) = linked.filter(|p| Some(p.id) == actor.person_id) else {
        return String::new();
    };
    match field {
        IdentityField::FirstName => person.first_name.clone(),
        IdentityField::LastName => person.last_name.clone(),
        IdentityField::Email => person.email.clone(),
        IdentityField::Language => person.language.clone(),
        IdentityField::BirthDate => format_date(person.birth_date),
        IdentityField::Country => person.country_of_citizenship.clone().unwrap_or_default(),
        IdentityField::Institute | IdentityField::City => String::new(),
    }
}

fn resolve_birth_date(actor: &ActorModel, linked: Option<&LinkedIdentityModel>) -> Option<NaiveDate> {
    if actor.is_external() {
        return actor.birth_date;
    }
    linked
        .filter(|p| Some(p.id) == actor.person_id)
        .and_then(|p| p.birth_date)
}

fn external_value(actor: &ActorModel, field: IdentityField) -> String {
    match field {
        IdentityField::FirstName => actor.first_name.to_string(),
        IdentityField::LastName => actor.last_name.to_string(),
        IdentityField::Email => actor.email.to_string(),
        IdentityField::Language => actor.language.to_string(),
        IdentityField::BirthDate => format_date(actor.birth_date),
        IdentityField::Institute => actor.institute.to_string(),
        IdentityField::City => actor.city.to_string(),
        IdentityField::Country => actor.country.to_string(),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Checks the identity invariant on the raw columns of an actor.
///
/// Exactly one of {complete external data, linked identity} must hold.
/// Mirrors the `external_xor_person` check constraint.
pub fn validate_identity(actor: &ActorModel) -> Result<(), ActorValidationError> {
    let missing: Vec<IdentityField> = IdentityField::ALL
        .into_iter()
        .filter(|field| external_value(actor, *field).trim().is_empty())
        .collect();
    let any_filled = missing.len() < IdentityField::ALL.len();

    match (actor.person_id.is_some(), any_filled) {
        (true, true) => Err(ActorValidationError::ConflictingIdentity),
        (true, false) => Ok(()),
        (false, false) => Err(ActorValidationError::DataRequired),
        (false, true) if missing.is_empty() => Ok(()),
        (false, true) => Err(ActorValidationError::IncompleteExternalData { missing }),
    }
}
