use chrono::{DateTime, Utc};
use signature_core_api::SignatureState;
use signature_core_db::models::signature::StateHistoryModel;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{StateHistoryRepositoryImpl, HISTORY_COLUMNS};

impl StateHistoryRepositoryImpl {
    /// Ledger head of one actor
    pub async fn find_latest(
        &self,
        actor_id: Uuid,
    ) -> Result<Option<StateHistoryModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM signature_state_history \
             WHERE actor_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1"
        );

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let entry = sqlx::query_as::<_, StateHistoryModel>(&query)
            .bind(actor_id)
            .fetch_optional(&mut **transaction)
            .await?;
        Ok(entry)
    }

    /// Ledger heads of several actors in one query, aligned with `actor_ids`
    pub async fn find_latest_by_actor_ids(
        &self,
        actor_ids: &[Uuid],
    ) -> Result<Vec<Option<StateHistoryModel>>, Box<dyn Error + Send + Sync>> {
        if actor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT DISTINCT ON (actor_id) {HISTORY_COLUMNS} FROM signature_state_history \
             WHERE actor_id = ANY($1) ORDER BY actor_id, created_at DESC, id DESC"
        );
        let entries = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as::<_, StateHistoryModel>(&query)
                .bind(actor_ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut heads: HashMap<Uuid, StateHistoryModel> =
            entries.into_iter().map(|e| (e.actor_id, e)).collect();
        Ok(actor_ids.iter().map(|id| heads.remove(id)).collect())
    }

    /// `NotInvited` when the actor has no entry
    pub async fn current_state(
        &self,
        actor_id: Uuid,
    ) -> Result<SignatureState, Box<dyn Error + Send + Sync>> {
        Ok(self
            .find_latest(actor_id)
            .await?
            .map(|entry| entry.state)
            .unwrap_or_default())
    }

    /// None when the actor has no entry
    pub async fn current_state_timestamp(
        &self,
        actor_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, Box<dyn Error + Send + Sync>> {
        Ok(self.find_latest(actor_id).await?.map(|entry| entry.created_at))
    }
}
