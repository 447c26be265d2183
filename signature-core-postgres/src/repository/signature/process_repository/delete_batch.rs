use async_trait::async_trait;
use signature_core_db::repository::delete_batch::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ProcessRepositoryImpl;

impl ProcessRepositoryImpl {
    /// Actors and their state history go with the process (`ON DELETE CASCADE`)
    pub(super) async fn delete_batch_impl(
        repo: &ProcessRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let result = sqlx::query(r#"DELETE FROM signature_process WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&mut **transaction)
            .await?;
        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for ProcessRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        _audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
