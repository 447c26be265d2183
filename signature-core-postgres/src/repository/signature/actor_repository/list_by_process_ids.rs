use signature_core_db::models::signature::ActorListingModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ActorRepositoryImpl;
use crate::utils::TryFromRow;

impl ActorRepositoryImpl {
    /// Actors of several processes with their ledger head, in one query.
    ///
    /// Rows are grouped by process in the order of `process_ids`, then in
    /// submission order. Actors without history carry `NOT_INVITED` and no
    /// timestamp.
    pub async fn list_by_process_ids(
        &self,
        process_ids: &[Uuid],
    ) -> Result<Vec<ActorListingModel>, Box<dyn Error + Send + Sync>> {
        if process_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT actor.*,
                       COALESCE(last.state, 'NOT_INVITED'::signature_state) AS last_state,
                       last.created_at AS last_state_at
                FROM signature_actor actor
                LEFT JOIN LATERAL (
                    SELECT h.state, h.created_at
                    FROM signature_state_history h
                    WHERE h.actor_id = actor.id
                    ORDER BY h.created_at DESC, h.id DESC
                    LIMIT 1
                ) last ON TRUE
                WHERE actor.process_id = ANY($1)
                ORDER BY array_position($1, actor.process_id), actor.seq
                "#,
            )
            .bind(process_ids)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(ActorListingModel::try_from_row).collect()
    }

    pub async fn list_by_process_id(
        &self,
        process_id: Uuid,
    ) -> Result<Vec<ActorListingModel>, Box<dyn Error + Send + Sync>> {
        self.list_by_process_ids(&[process_id]).await
    }
}
