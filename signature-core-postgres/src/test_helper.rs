//! Transaction-scoped database access for tests.
//!
//! Each context runs in its own transaction which is rolled back when the
//! context is dropped, so tests never see each other's data.

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DEFAULT_DATABASE_URL;
use crate::postgres_repositories::{PostgresRepositories, SignatureSession};
use crate::repository::audit::AuditRepositories;
use crate::repository::signature::SignatureRepositories;

pub struct TestContext {
    pub session: SignatureSession,
    pub repositories: Arc<PostgresRepositories>,
}

impl TestContext {
    pub fn audit_repos(&self) -> &AuditRepositories {
        self.session.audit_repos()
    }

    pub fn signature_repos(&self) -> &SignatureRepositories {
        self.session.signature_repos()
    }
}

async fn connect(max_connections: u32) -> Result<PostgresRepositories, Box<dyn std::error::Error + Send + Sync>> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(PostgresRepositories::new(Arc::new(pool)))
}

/// Migrated database plus one open session that is never committed
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let repositories = Arc::new(connect(2).await?);
    let session = repositories.begin().await?;
    Ok(TestContext {
        session,
        repositories,
    })
}

/// Pool without an open session, for tests that commit in one session and
/// observe from another
#[allow(dead_code)]
pub async fn setup_shared_repos() -> Result<Arc<PostgresRepositories>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Arc::new(connect(5).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::signature::test_utils::create_test_process;
    use signature_core_db::repository::{CreateBatch, DeleteBatch, ExistByIds};

    #[tokio::test]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let process = create_test_process(None);
        {
            let ctx = setup_test_context().await?;
            let repo = &ctx.signature_repos().process_repository;
            repo.create_batch(vec![process.clone()], None).await?;
            assert_eq!(repo.exist_by_ids(&[process.id]).await?, vec![(process.id, true)]);
        }

        let ctx = setup_test_context().await?;
        let repo = &ctx.signature_repos().process_repository;
        assert_eq!(repo.exist_by_ids(&[process.id]).await?, vec![(process.id, false)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_commit_is_visible_to_other_sessions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let repositories = setup_shared_repos().await?;
        let process = create_test_process(Some("commit-test"));

        let session = repositories.begin().await?;
        session
            .signature_repos()
            .process_repository
            .create_batch(vec![process.clone()], None)
            .await?;
        session.commit().await?;

        let session = repositories.begin().await?;
        let repo = &session.signature_repos().process_repository;
        assert_eq!(repo.exist_by_ids(&[process.id]).await?, vec![(process.id, true)]);
        repo.delete_batch(&[process.id], None).await?;
        session.commit().await?;

        Ok(())
    }
}
