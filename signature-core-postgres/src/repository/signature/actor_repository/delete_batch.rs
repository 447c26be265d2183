use async_trait::async_trait;
use signature_core_db::models::audit::{AuditLinkModel, EntityType};
use signature_core_db::repository::delete_batch::DeleteBatch;
use signature_core_db::repository::load_batch::LoadBatch;
use signature_core_db::utils::hash_as_i64;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_actor, ActorRepositoryImpl, ACTOR_COLUMNS, ACTOR_VALUES};

impl ActorRepositoryImpl {
    /// Records a final audit version of each actor, then deletes it. The
    /// actor's state history goes with it (`ON DELETE CASCADE`).
    pub(super) async fn delete_batch_impl(
        repo: &ActorRepositoryImpl,
        ids: &[Uuid],
        audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let audit_log_id = audit_log_id.ok_or("audit_log_id is required for ActorModel")?;
        if ids.is_empty() {
            return Ok(0);
        }

        let entities_to_delete = repo.load_batch(ids).await?;
        let audit_insert =
            format!("INSERT INTO signature_actor_audit ({ACTOR_COLUMNS}) VALUES ({ACTOR_VALUES})");
        let mut deleted_count = 0;

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for entity in entities_to_delete.into_iter().flatten() {
            let mut final_version = entity.clone();
            final_version.antecedent_hash = entity.hash;
            final_version.antecedent_audit_log_id = entity
                .audit_log_id
                .ok_or("Entity must have audit_log_id for deletion")?;
            final_version.audit_log_id = Some(audit_log_id);
            final_version.hash = 0;
            final_version.hash = hash_as_i64(&final_version)?;

            bind_actor(sqlx::query(&audit_insert), &final_version)
                .execute(&mut **transaction)
                .await?;

            let result = sqlx::query(r#"DELETE FROM signature_actor WHERE id = $1"#)
                .bind(entity.id)
                .execute(&mut **transaction)
                .await?;

            let audit_link = AuditLinkModel {
                audit_log_id,
                entity_id: entity.id,
                entity_type: EntityType::SignatureActor,
            };
            sqlx::query(
                r#"
                INSERT INTO audit_link (audit_log_id, entity_id, entity_type)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(audit_link.audit_log_id)
            .bind(audit_link.entity_id)
            .bind(audit_link.entity_type)
            .execute(&mut **transaction)
            .await?;

            deleted_count += result.rows_affected() as usize;
        }

        Ok(deleted_count)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for ActorRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::signature::test_utils::{
        create_test_audit_log, create_test_external_actor, create_test_process,
    };
    use crate::test_helper::setup_test_context;
    use signature_core_api::SignatureState;
    use signature_core_db::repository::{CreateBatch, DeleteBatch, ExistByIds, LoadAudits, PageRequest};

    #[tokio::test]
    async fn test_delete_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let audit_log_repo = &ctx.audit_repos().audit_log_repository;
        let audit_log = create_test_audit_log();
        audit_log_repo.create(&audit_log).await?;

        let process = create_test_process(None);
        repos.process_repository.create_batch(vec![process.clone()], None).await?;
        let actor = create_test_external_actor(process.id, "John");
        repos
            .actor_repository
            .create_batch(vec![actor.clone()], Some(audit_log.id))
            .await?;
        repos.state_history_repository.append(actor.id, SignatureState::Invited).await?;

        let delete_log = create_test_audit_log();
        audit_log_repo.create(&delete_log).await?;
        let deleted = repos
            .actor_repository
            .delete_batch(&[actor.id, uuid::Uuid::new_v4()], Some(delete_log.id))
            .await?;

        assert_eq!(deleted, 1);
        assert_eq!(
            repos.actor_repository.exist_by_ids(&[actor.id]).await?,
            vec![(actor.id, false)]
        );
        assert!(repos.state_history_repository.find_by_actor_id(actor.id).await?.is_empty());

        // Created + final version
        let audits = repos
            .actor_repository
            .load_audits(actor.id, PageRequest::default())
            .await?;
        assert_eq!(audits.total, 2);

        Ok(())
    }
}
