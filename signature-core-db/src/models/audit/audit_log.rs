use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use crate::models::Identifiable;

/// # Documentation
/// - One audit log per database transaction touching signature actors.
/// - Every actor row written in that transaction references the same audit log.
/// - `updated_by_person_id` is empty when the change came from an anonymous
///   actor redeeming an invite token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by_person_id: Option<Uuid>,
}

impl AuditLogModel {
    pub fn new(updated_by_person_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            updated_at: Utc::now(),
            updated_by_person_id,
        }
    }
}

impl Identifiable for AuditLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
