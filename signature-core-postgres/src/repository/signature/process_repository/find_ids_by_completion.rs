use signature_core_db::repository::pagination::{Page, PageRequest};
use std::error::Error;
use uuid::Uuid;

use super::completion::all_signed_predicate;
use super::repo_impl::ProcessRepositoryImpl;

impl ProcessRepositoryImpl {
    /// Ids of the processes whose completion equals `all_signed`.
    ///
    /// Completion is evaluated by the database for every candidate in the
    /// same query, never one process at a time.
    pub async fn find_ids_by_completion(
        &self,
        all_signed: bool,
        page: PageRequest,
    ) -> Result<Page<Uuid>, Box<dyn Error + Send + Sync>> {
        let predicate = all_signed_predicate("p");
        let count_query =
            format!("SELECT COUNT(*) FROM signature_process p WHERE ({predicate}) = $1");
        let query = format!(
            "SELECT p.id FROM signature_process p WHERE ({predicate}) = $1 \
             ORDER BY p.id LIMIT $2 OFFSET $3"
        );

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(all_signed)
            .fetch_one(&mut **transaction)
            .await?;
        let items: Vec<Uuid> = sqlx::query_scalar(&query)
            .bind(all_signed)
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&mut **transaction)
            .await?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::signature::test_utils::{
        create_test_audit_log, create_test_external_actor, create_test_process,
    };
    use crate::test_helper::setup_test_context;
    use signature_core_api::SignatureState;
    use signature_core_db::repository::{CreateBatch, PageRequest};

    #[tokio::test]
    async fn test_filter_by_completion() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let audit_log = create_test_audit_log();
        ctx.audit_repos().audit_log_repository.create(&audit_log).await?;

        let signed = create_test_process(None);
        let pending = create_test_process(None);
        repos
            .process_repository
            .create_batch(vec![signed.clone(), pending.clone()], None)
            .await?;
        let a = create_test_external_actor(signed.id, "Anna");
        let b = create_test_external_actor(pending.id, "Bert");
        repos
            .actor_repository
            .create_batch(vec![a.clone(), b], Some(audit_log.id))
            .await?;
        repos.state_history_repository.append(a.id, SignatureState::Approved).await?;

        let all = PageRequest::new(10_000, 0);
        let done = repos.process_repository.find_ids_by_completion(true, all).await?;
        let open = repos.process_repository.find_ids_by_completion(false, all).await?;

        assert!(done.items.contains(&signed.id));
        assert!(!done.items.contains(&pending.id));
        assert!(open.items.contains(&pending.id));
        assert!(!open.items.contains(&signed.id));

        Ok(())
    }
}
