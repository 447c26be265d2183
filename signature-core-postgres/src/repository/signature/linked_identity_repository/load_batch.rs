use async_trait::async_trait;
use signature_core_db::models::signature::LinkedIdentityModel;
use signature_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::LinkedIdentityRepositoryImpl;

impl LinkedIdentityRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &LinkedIdentityRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<LinkedIdentityModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as::<_, LinkedIdentityModel>(
                r#"
                SELECT id, first_name, last_name, email, language, birth_date,
                       TRIM(country_of_citizenship) AS country_of_citizenship
                FROM person
                WHERE id = ANY($1)
                "#,
            )
            .bind(ids)
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut map: HashMap<Uuid, LinkedIdentityModel> =
            rows.into_iter().map(|p| (p.id, p)).collect();
        Ok(ids.iter().map(|id| map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, LinkedIdentityModel> for LinkedIdentityRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<LinkedIdentityModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
