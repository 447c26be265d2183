use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Existence check for several ids, answered in the order they were given
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
