use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use crate::models::identifiable::Identifiable;

/// # Documentation
/// Read-only view of an identity record owned by the host application.
///
/// Linked actors read their identity values from here. The record has no
/// institute or city; those resolve to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LinkedIdentityModel {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub language: String,
    pub birth_date: Option<NaiveDate>,
    /// ISO 3166-1 alpha-2 code
    pub country_of_citizenship: Option<String>,
}

impl Identifiable for LinkedIdentityModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl std::fmt::Display for LinkedIdentityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.last_name.to_uppercase(), self.first_name)
    }
}
