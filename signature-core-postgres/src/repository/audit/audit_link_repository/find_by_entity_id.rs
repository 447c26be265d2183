use signature_core_db::models::audit::AuditLinkModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::AuditLinkRepositoryImpl;

impl AuditLinkRepositoryImpl {
    /// Every audit log that touched one entity, oldest first
    pub async fn find_by_entity_id(
        &self,
        entity_id: Uuid,
    ) -> Result<Vec<AuditLinkModel>, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query_as::<_, AuditLinkModel>(
            r#"
            SELECT l.audit_log_id, l.entity_id, l.entity_type
            FROM audit_link l
            JOIN audit_log a ON a.id = l.audit_log_id
            WHERE l.entity_id = $1
            ORDER BY a.updated_at ASC
            "#,
        )
        .bind(entity_id);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        Ok(query.fetch_all(&mut **transaction).await?)
    }
}
