use signature_core_db::models::signature::StateHistoryModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{StateHistoryRepositoryImpl, HISTORY_COLUMNS};

impl StateHistoryRepositoryImpl {
    /// Full ledger of one actor, oldest first
    pub async fn find_by_actor_id(
        &self,
        actor_id: Uuid,
    ) -> Result<Vec<StateHistoryModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM signature_state_history \
             WHERE actor_id = $1 ORDER BY created_at ASC, id ASC"
        );

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let entries = sqlx::query_as::<_, StateHistoryModel>(&query)
            .bind(actor_id)
            .fetch_all(&mut **transaction)
            .await?;
        Ok(entries)
    }
}
