use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Deletes entities by id and returns how many rows were removed.
///
/// Unknown ids are skipped. Deletes cascade according to the schema: removing
/// a process removes its actors, removing an actor removes its state history.
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
