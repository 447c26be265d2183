use signature_core_api::SignatureState;
use signature_core_db::models::signature::StateHistoryModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{StateHistoryRepositoryImpl, HISTORY_COLUMNS};

impl StateHistoryRepositoryImpl {
    /// Appends one entry with a server-assigned timestamp.
    ///
    /// The timestamp is strictly greater than every earlier entry of the same
    /// actor, even if the clock did not advance. Any state is accepted.
    pub async fn append(
        &self,
        actor_id: Uuid,
        state: SignatureState,
    ) -> Result<StateHistoryModel, Box<dyn Error + Send + Sync>> {
        let query = format!(
            r#"
            INSERT INTO signature_state_history (actor_id, state, created_at)
            VALUES (
                $1,
                $2,
                GREATEST(
                    clock_timestamp(),
                    (SELECT MAX(created_at) + interval '1 microsecond'
                     FROM signature_state_history WHERE actor_id = $1)
                )
            )
            RETURNING {HISTORY_COLUMNS}
            "#
        );

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let entry = sqlx::query_as::<_, StateHistoryModel>(&query)
            .bind(actor_id)
            .bind(state)
            .fetch_one(&mut **transaction)
            .await?;
        Ok(entry)
    }
}
