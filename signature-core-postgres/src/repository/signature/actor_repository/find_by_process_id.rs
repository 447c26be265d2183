use signature_core_db::models::signature::ActorModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{ActorRepositoryImpl, ACTOR_COLUMNS};
use crate::utils::TryFromRow;

impl ActorRepositoryImpl {
    /// Actors of one process in submission order, without state
    pub async fn find_by_process_id(
        &self,
        process_id: Uuid,
    ) -> Result<Vec<ActorModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT {ACTOR_COLUMNS} FROM signature_actor WHERE process_id = $1 ORDER BY seq"
        );
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query)
                .bind(process_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(ActorModel::try_from_row).collect()
    }
}
