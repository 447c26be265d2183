use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::identifiable::Identifiable;

/// # Documentation
/// A signature process groups the actors who must approve one document.
///
/// Immutable once created. Deleting a process cascades to its actors and
/// their state history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessModel {
    pub id: Uuid,

    /// Free-form reference tag set by the host application, at most 150
    /// characters (capacity is in bytes)
    pub field_ref: Option<HeaplessString<600>>,
}

impl ProcessModel {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            field_ref: None,
        }
    }

    /// Fails when the tag exceeds 150 characters
    pub fn with_field_ref(field_ref: &str) -> Result<Self, String> {
        let too_long = || format!("Field reference is too long (max 150 chars): {field_ref}");
        if field_ref.chars().count() > 150 {
            return Err(too_long());
        }
        let field_ref = HeaplessString::try_from(field_ref).map_err(|_| too_long())?;
        Ok(Self {
            id: Uuid::new_v4(),
            field_ref: Some(field_ref),
        })
    }
}

impl Default for ProcessModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Identifiable for ProcessModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ref_length_counts_characters() {
        let tag = "é".repeat(150);
        let process = ProcessModel::with_field_ref(&tag).unwrap();
        assert_eq!(process.field_ref.as_deref(), Some(tag.as_str()));

        assert!(ProcessModel::with_field_ref(&"é".repeat(151)).is_err());
    }
}
