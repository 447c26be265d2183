use async_trait::async_trait;
use signature_core_db::models::signature::ProcessModel;
use signature_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ProcessRepositoryImpl;
use crate::utils::TryFromRow;

impl ProcessRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ProcessRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ProcessModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT id, field_ref FROM signature_process WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = ProcessModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }
        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ProcessModel> for ProcessRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ProcessModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
