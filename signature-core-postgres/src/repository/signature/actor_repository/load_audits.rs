use async_trait::async_trait;
use signature_core_db::models::signature::ActorModel;
use signature_core_db::repository::load_audits::LoadAudits;
use signature_core_db::repository::pagination::{Page, PageRequest};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ActorRepositoryImpl;
use crate::utils::TryFromRow;

impl ActorRepositoryImpl {
    pub(super) async fn load_audits_impl(
        repo: &ActorRepositoryImpl,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActorModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM signature_actor_audit WHERE id = $1"#)
                .bind(id)
                .fetch_one(&mut **transaction)
                .await?;

        let rows = sqlx::query(
            r#"
            SELECT audit.*
            FROM signature_actor_audit audit
            JOIN audit_log log ON log.id = audit.audit_log_id
            WHERE audit.id = $1
            ORDER BY log.updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(id)
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&mut **transaction)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ActorModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAudits<Postgres, ActorModel> for ActorRepositoryImpl {
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActorModel>, Box<dyn Error + Send + Sync>> {
        Self::load_audits_impl(self, id, page).await
    }
}
