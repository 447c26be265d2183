use async_trait::async_trait;
use signature_core_db::models::signature::ProcessModel;
use signature_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ProcessRepositoryImpl;

impl ProcessRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ProcessRepositoryImpl,
        items: Vec<ProcessModel>,
    ) -> Result<Vec<ProcessModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        for item in &items {
            sqlx::query(r#"INSERT INTO signature_process (id, field_ref) VALUES ($1, $2)"#)
                .bind(item.id)
                .bind(item.field_ref.as_deref())
                .execute(&mut **transaction)
                .await?;
        }
        Ok(items)
    }
}

/// Processes are not audited; `audit_log_id` is ignored.
#[async_trait]
impl CreateBatch<Postgres, ProcessModel> for ProcessRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ProcessModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ProcessModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
