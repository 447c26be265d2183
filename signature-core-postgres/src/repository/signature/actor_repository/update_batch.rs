use async_trait::async_trait;
use signature_core_db::models::audit::{AuditLinkModel, EntityType};
use signature_core_db::models::signature::ActorModel;
use signature_core_db::repository::update_batch::UpdateBatch;
use signature_core_db::utils::hash_as_i64;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_actor, ActorRepositoryImpl, ACTOR_COLUMNS, ACTOR_VALUES};

impl ActorRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ActorRepositoryImpl,
        items: Vec<ActorModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ActorModel>, Box<dyn Error + Send + Sync>> {
        let audit_log_id = audit_log_id.ok_or("audit_log_id is required for ActorModel")?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let audit_insert =
            format!("INSERT INTO signature_actor_audit ({ACTOR_COLUMNS}) VALUES ({ACTOR_VALUES})");
        // process_id is immutable
        let update = r#"
            UPDATE signature_actor SET
            person_id = $3, first_name = $4, last_name = $5, email = $6,
            language = $7, birth_date = $8, institute = $9, city = $10, country = $11,
            comment = $12, pdf_file = $13,
            antecedent_hash = $14, antecedent_audit_log_id = $15,
            hash = $16, audit_log_id = $17
            WHERE id = $1 AND process_id = $2 AND hash = $18 AND audit_log_id = $19
        "#;

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            let previous_hash = item.hash;
            let previous_audit_log_id = item
                .audit_log_id
                .ok_or("Entity must have audit_log_id for update")?;

            if !item.is_modified()? {
                updated_items.push(item);
                continue;
            }

            item.antecedent_hash = previous_hash;
            item.antecedent_audit_log_id = previous_audit_log_id;
            item.audit_log_id = Some(audit_log_id);
            item.hash = 0;
            item.hash = hash_as_i64(&item)?;

            bind_actor(sqlx::query(&audit_insert), &item)
                .execute(&mut **transaction)
                .await?;

            let rows_affected = bind_actor(sqlx::query(update), &item)
                .bind(previous_hash)
                .bind(previous_audit_log_id)
                .execute(&mut **transaction)
                .await?
                .rows_affected();
            if rows_affected == 0 {
                return Err("Concurrent update detected".into());
            }

            let audit_link = AuditLinkModel {
                audit_log_id,
                entity_id: item.id,
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

            updated_items.push(item);
        }

        Ok(updated_items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ActorModel> for ActorRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ActorModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ActorModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::signature::test_utils::{
        create_test_audit_log, create_test_external_actor, create_test_process,
    };
    use crate::test_helper::setup_test_context;
    use signature_core_db::repository::{CreateBatch, LoadBatch, UpdateBatch};

    #[tokio::test]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let audit_log_repo = &ctx.audit_repos().audit_log_repository;
        let audit_log = create_test_audit_log();
        audit_log_repo.create(&audit_log).await?;

        let process = create_test_process(None);
        repos.process_repository.create_batch(vec![process.clone()], None).await?;
        let saved = repos
            .actor_repository
            .create_batch(vec![create_test_external_actor(process.id, "John")], Some(audit_log.id))
            .await?;

        let update_log = create_test_audit_log();
        audit_log_repo.create(&update_log).await?;
        let mut changed = saved[0].clone();
        changed.comment = "Looks good".to_string();
        let updated = repos
            .actor_repository
            .update_batch(vec![changed], Some(update_log.id))
            .await?;

        assert_eq!(updated[0].antecedent_hash, saved[0].hash);
        assert_eq!(updated[0].antecedent_audit_log_id, saved[0].audit_log_id.unwrap());
        assert_eq!(updated[0].audit_log_id, Some(update_log.id));

        let loaded = repos.actor_repository.load_batch(&[saved[0].id]).await?;
        assert_eq!(loaded[0].as_ref().map(|a| a.comment.as_str()), Some("Looks good"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unchanged_and_stale_updates() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let audit_log_repo = &ctx.audit_repos().audit_log_repository;
        let audit_log = create_test_audit_log();
        audit_log_repo.create(&audit_log).await?;

        let process = create_test_process(None);
        repos.process_repository.create_batch(vec![process.clone()], None).await?;
        let saved = repos
            .actor_repository
            .create_batch(vec![create_test_external_actor(process.id, "John")], Some(audit_log.id))
            .await?;

        // Nothing changed: no new version
        let update_log = create_test_audit_log();
        audit_log_repo.create(&update_log).await?;
        let unchanged = repos
            .actor_repository
            .update_batch(saved.clone(), Some(update_log.id))
            .await?;
        assert_eq!(unchanged[0].audit_log_id, Some(audit_log.id));

        // First writer wins, the second one holds a stale hash
        let mut first = saved[0].clone();
        first.comment = "first".to_string();
        repos.actor_repository.update_batch(vec![first], Some(update_log.id)).await?;

        let stale_log = create_test_audit_log();
        audit_log_repo.create(&stale_log).await?;
        let mut stale = saved[0].clone();
        stale.comment = "second".to_string();
        let result = repos.actor_repository.update_batch(vec![stale], Some(stale_log.id)).await;
        assert!(result.is_err());

        Ok(())
    }
}
