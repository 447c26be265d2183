use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ProcessRepositoryImpl;

/// Latest ledger state of the actor aliased `actor`, `NOT_INVITED` without history
pub const LAST_STATE_SQL: &str = r#"COALESCE(
    (SELECT h.state FROM signature_state_history h
     WHERE h.actor_id = actor.id
     ORDER BY h.created_at DESC, h.id DESC
     LIMIT 1),
    'NOT_INVITED'::signature_state
)"#;

/// Boolean SQL expression, true iff every actor of the process row aliased
/// `process_alias` is approved. Embeddable in any query over
/// `signature_process`; a process without actors is all signed.
///
/// ```
/// use signature_core_postgres::repository::signature::process_repository::all_signed_predicate;
///
/// let sql = format!("SELECT p.id FROM signature_process p WHERE {}", all_signed_predicate("p"));
/// assert!(sql.contains("NOT EXISTS"));
/// ```
pub fn all_signed_predicate(process_alias: &str) -> String {
    format!(
        "NOT EXISTS (SELECT 1 FROM signature_actor actor \
         WHERE actor.process_id = {process_alias}.id \
         AND {LAST_STATE_SQL} <> 'APPROVED'::signature_state)"
    )
}

impl ProcessRepositoryImpl {
    /// Completion of several processes in one query, in the order of `ids`.
    ///
    /// Unknown process ids are omitted.
    pub async fn all_signed_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT p.id, {} AS all_signed FROM signature_process p WHERE p.id = ANY($1)",
            all_signed_predicate("p")
        );
        let rows: Vec<(Uuid, bool)> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as(&query)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let completion: HashMap<Uuid, bool> = rows.into_iter().collect();
        Ok(ids
            .iter()
            .filter_map(|id| completion.get(id).map(|signed| (*id, *signed)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::signature::test_utils::{
        create_test_audit_log, create_test_external_actor, create_test_process,
    };
    use crate::test_helper::setup_test_context;
    use signature_core_api::SignatureState;
    use signature_core_db::repository::CreateBatch;

    #[test]
    fn test_predicate_uses_alias() {
        let predicate = all_signed_predicate("parent_process");
        assert!(predicate.contains("actor.process_id = parent_process.id"));
        assert!(predicate.starts_with("NOT EXISTS"));
    }

    #[tokio::test]
    async fn test_all_signed_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let audit_log = create_test_audit_log();
        ctx.audit_repos().audit_log_repository.create(&audit_log).await?;

        let empty = create_test_process(None);
        let signed = create_test_process(None);
        let pending = create_test_process(None);
        repos
            .process_repository
            .create_batch(vec![empty.clone(), signed.clone(), pending.clone()], None)
            .await?;

        let a = create_test_external_actor(signed.id, "Anna");
        let b = create_test_external_actor(pending.id, "Bert");
        let c = create_test_external_actor(pending.id, "Cleo");
        repos
            .actor_repository
            .create_batch(vec![a.clone(), b.clone(), c.clone()], Some(audit_log.id))
            .await?;

        let ledger = &repos.state_history_repository;
        ledger.append(a.id, SignatureState::Approved).await?;
        ledger.append(b.id, SignatureState::Approved).await?;
        ledger.append(c.id, SignatureState::Approved).await?;
        ledger.append(c.id, SignatureState::Declined).await?;

        let unknown = Uuid::new_v4();
        let result = repos
            .process_repository
            .all_signed_batch(&[pending.id, unknown, empty.id, signed.id])
            .await?;
        assert_eq!(
            result,
            vec![(pending.id, false), (empty.id, true), (signed.id, true)]
        );

        Ok(())
    }
}
