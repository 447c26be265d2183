use async_trait::async_trait;
use signature_core_db::models::audit::{AuditLinkModel, EntityType};
use signature_core_db::models::signature::ActorModel;
use signature_core_db::repository::create_batch::CreateBatch;
use signature_core_db::utils::hash_as_i64;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_actor, ActorRepositoryImpl, ACTOR_COLUMNS, ACTOR_VALUES};

impl ActorRepositoryImpl {
    pub(super) async fn create_batch_impl(
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
        let insert = format!("INSERT INTO signature_actor ({ACTOR_COLUMNS}) VALUES ({ACTOR_VALUES})");

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.hash = 0;
            item.audit_log_id = Some(audit_log_id);
            item.hash = hash_as_i64(&item)?;

            bind_actor(sqlx::query(&audit_insert), &item)
                .execute(&mut **transaction)
                .await?;
            bind_actor(sqlx::query(&insert), &item)
                .execute(&mut **transaction)
                .await?;

            let audit_link = AuditLinkModel {
                audit_log_id,
                entity_id: item.id,
                entity_type: EntityType::SignatureActor,
            };
            sqlx::query(
                r#"
                INSERT INTO audit_link (audit_log_id, entity_id, entity_type)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(audit_link.audit_log_id)
            .bind(audit_link.entity_id)
            .bind(audit_link.entity_type)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ActorModel> for ActorRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ActorModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ActorModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}
