use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Inserts several entities within the caller's transaction.
///
/// Audited entities (actors) require `audit_log_id`; the returned items carry
/// their computed `hash` and `audit_log_id`. Plain entities (processes) ignore
/// it.
///
/// # Example
/// ```ignore
/// let saved = actor_repo.create_batch(vec![actor], Some(audit_log.id)).await?;
/// assert_eq!(saved[0].audit_log_id, Some(audit_log.id));
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    async fn create_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
