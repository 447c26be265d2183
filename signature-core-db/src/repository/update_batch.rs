use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Updates several previously loaded entities.
///
/// Items whose content hash did not change are returned untouched and write
/// nothing. A changed item is written only if the stored row still carries the
/// hash it was loaded with, otherwise the call fails with
/// "Concurrent update detected".
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
