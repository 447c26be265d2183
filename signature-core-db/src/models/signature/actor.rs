use chrono::NaiveDate;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use signature_core_api::domain::{ActorInput, ActorValidationError, IdentityField};
use uuid::Uuid;
use crate::models::auditable::Auditable;
use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// # Documentation
/// Database model for one signer of a process.
///
/// An actor is either external (identity values held in its own columns) or
/// linked (`person_id` references a host identity record and the external
/// columns stay empty). `validate_identity` and the `external_xor_person`
/// check constraint both enforce that exactly one of the two holds.
///
/// The current state is not stored here: it is the latest state history
/// entry of the actor, see `ActorListingModel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorModel {
    pub id: Uuid,

    /// References ProcessModel.id
    pub process_id: Uuid,

    /// References LinkedIdentityModel.id for linked actors
    pub person_id: Option<Uuid>,

    // Capacities are in bytes: four per character of the column length
    pub first_name: HeaplessString<200>,
    pub last_name: HeaplessString<200>,
    pub email: HeaplessString<1020>,
    pub language: HeaplessString<120>,
    pub birth_date: Option<NaiveDate>,
    pub institute: HeaplessString<1020>,
    pub city: HeaplessString<1020>,
    /// ISO 3166-1 alpha-2 code
    pub country: HeaplessString<8>,

    pub comment: String,

    /// Attachment store reference of the signed PDF
    pub pdf_file: Option<Uuid>,

    /// Hash from the previous audit record for chain verification (0 for initial create)
    pub antecedent_hash: i64,

    /// Reference to the previous audit log entry (Uuid::nil() for initial create)
    pub antecedent_audit_log_id: Uuid,

    /// Hash of the entity with hash field set to 0
    /// - 0: for new entities not yet created or not yet hashed
    /// - Non-zero: computed hash providing tamper detection
    pub hash: i64,

    /// Reference to the current audit log entry for this entity
    /// - None: for new entities not yet created
    /// - Some(uuid): updated on every create/update operation to reference the latest audit log
    pub audit_log_id: Option<Uuid>,
}

impl ActorModel {
    /// Builds a new, not yet persisted actor from a roster entry
    pub fn from_input(process_id: Uuid, input: &ActorInput) -> Result<Self, ActorValidationError> {
        let mut actor = ActorModel {
            id: Uuid::new_v4(),
            process_id,
            person_id: None,
            first_name: HeaplessString::new(),
            last_name: HeaplessString::new(),
            email: HeaplessString::new(),
            language: HeaplessString::new(),
            birth_date: None,
            institute: HeaplessString::new(),
            city: HeaplessString::new(),
            country: HeaplessString::new(),
            comment: String::new(),
            pdf_file: None,
            antecedent_hash: 0,
            antecedent_audit_log_id: Uuid::nil(),
            hash: 0,
            audit_log_id: None,
        };
        actor.apply_input(input)?;
        Ok(actor)
    }

    /// Copies identity and signing values of a roster entry onto this actor.
    ///
    /// Id, process and audit fields are left untouched.
    pub fn apply_input(&mut self, input: &ActorInput) -> Result<(), ActorValidationError> {
        self.person_id = input.person_id;
        self.first_name = bounded(IdentityField::FirstName, &input.first_name, 50)?;
        self.last_name = bounded(IdentityField::LastName, &input.last_name, 50)?;
        self.email = bounded(IdentityField::Email, &input.email, 255)?;
        self.language = bounded(IdentityField::Language, &input.language, 30)?;
        self.birth_date = input.birth_date;
        self.institute = bounded(IdentityField::Institute, &input.institute, 255)?;
        self.city = bounded(IdentityField::City, &input.city, 255)?;
        self.country = bounded(IdentityField::Country, &input.country, 2)?;
        self.comment = input.comment.clone();
        self.pdf_file = input.pdf_file;
        Ok(())
    }

    /// True iff no linked identity is referenced
    pub fn is_external(&self) -> bool {
        self.person_id.is_none()
    }

    /// True when the values differ from the ones `hash` was computed over.
    /// Always true for an actor that was never stored.
    pub fn is_modified(&self) -> Result<bool, String> {
        let mut unhashed = self.clone();
        unhashed.hash = 0;
        Ok(hash_as_i64(&unhashed)? != self.hash)
    }
}

/// Limits count characters, like the `VARCHAR(max_chars)` column
fn bounded<const N: usize>(
    field: IdentityField,
    value: &str,
    max_chars: usize,
) -> Result<HeaplessString<N>, ActorValidationError> {
    let too_long = || ActorValidationError::InvalidField {
        field: field.name().to_string(),
        message: format!("Ensure this value has at most {max_chars} characters"),
    };
    let value = value.trim();
    if value.chars().count() > max_chars {
        return Err(too_long());
    }
    HeaplessString::try_from(value).map_err(|_| too_long())
}

impl Identifiable for ActorModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for ActorModel {
    fn get_audit_log_id(&self) -> Option<Uuid> {
        self.audit_log_id
    }
}

impl std::fmt::Display for ActorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(person_id) = self.person_id {
            return write!(f, "Actor (from person: {person_id})");
        }
        let birth_date = self
            .birth_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let values = [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.language.as_str(),
            birth_date.as_str(),
            self.institute.as_str(),
            self.city.as_str(),
            self.country.as_str(),
        ];
        let joined = values
            .iter()
            .filter(|v| !v.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "Actor ({joined})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external_input() -> ActorInput {
        ActorInput {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "foo@example.com".to_string(),
            language: "fr".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1),
            institute: "UCLouvain".to_string(),
            city: "Louvain-la-Neuve".to_string(),
            country: "BE".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_input_copies_external_values() {
        let process_id = Uuid::new_v4();
        let actor = ActorModel::from_input(process_id, &external_input()).unwrap();

        assert_eq!(actor.process_id, process_id);
        assert!(actor.is_external());
        assert_eq!(actor.first_name.as_str(), "John");
        assert_eq!(actor.country.as_str(), "BE");
        assert_eq!(actor.hash, 0);
        assert!(actor.audit_log_id.is_none());
    }

    #[test]
    fn test_from_input_rejects_overlong_values() {
        let input = ActorInput {
            city: "x".repeat(256),
            ..external_input()
        };
        let error = ActorModel::from_input(Uuid::new_v4(), &input).unwrap_err();
        assert_eq!(error.code(), "ACTOR_INVALID_FIELD");
    }

    #[test]
    fn test_multibyte_values_are_limited_by_characters() {
        let input = ActorInput {
            first_name: "Александра-Екатерина Иванова".to_string(),
            city: "Zürich".to_string(),
            ..external_input()
        };
        assert!(input.format_errors().is_empty());

        let actor = ActorModel::from_input(Uuid::new_v4(), &input).unwrap();
        assert_eq!(actor.first_name.as_str(), "Александра-Екатерина Иванова");

        let too_long = ActorInput {
            first_name: "Ж".repeat(51),
            ..external_input()
        };
        let error = ActorModel::from_input(Uuid::new_v4(), &too_long).unwrap_err();
        assert_eq!(
            error,
            ActorValidationError::InvalidField {
                field: "first_name".to_string(),
                message: "Ensure this value has at most 50 characters".to_string(),
            }
        );
        // Exactly at the limit
        let at_limit = ActorInput {
            first_name: "Ж".repeat(50),
            country: "ÅÄ".to_string(),
            ..external_input()
        };
        assert!(ActorModel::from_input(Uuid::new_v4(), &at_limit).is_ok());
    }

    #[test]
    fn test_is_modified() {
        let mut actor = ActorModel::from_input(Uuid::new_v4(), &external_input()).unwrap();
        assert!(actor.is_modified().unwrap());

        actor.audit_log_id = Some(Uuid::new_v4());
        actor.hash = hash_as_i64(&actor).unwrap();
        assert!(!actor.is_modified().unwrap());

        actor.comment = "Signed".to_string();
        assert!(actor.is_modified().unwrap());
    }

    #[test]
    fn test_display() {
        let actor = ActorModel::from_input(Uuid::new_v4(), &external_input()).unwrap();
        assert_eq!(
            actor.to_string(),
            "Actor (John Doe foo@example.com fr 1980-01-01 UCLouvain Louvain-la-Neuve BE)"
        );

        let person_id = Uuid::new_v4();
        let linked = ActorModel::from_input(Uuid::new_v4(), &ActorInput::linked(person_id)).unwrap();
        assert!(!linked.is_external());
        assert_eq!(linked.to_string(), format!("Actor (from person: {person_id})"));
    }
}
