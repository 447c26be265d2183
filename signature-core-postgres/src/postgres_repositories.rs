use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::repository::audit::{AuditRepoFactory, AuditRepositories};
use crate::repository::signature::{SignatureRepoFactory, SignatureRepositories};

/// Entry point of the storage layer: opens one session per request
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    audit_factory: Arc<AuditRepoFactory>,
    signature_factory: Arc<SignatureRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            audit_factory: AuditRepoFactory::new(),
            signature_factory: SignatureRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Starts a transaction shared by every repository of the session
    pub async fn begin(&self) -> Result<SignatureSession, sqlx::Error> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);
        Ok(SignatureSession {
            audit_repos: self.audit_factory.build_all_repos(&executor),
            signature_repos: self.signature_factory.build_all_repos(&executor),
            executor,
        })
    }
}

/// One unit of work. Changes become visible on [`commit`](Self::commit);
/// dropping an uncommitted session rolls everything back.
pub struct SignatureSession {
    executor: Executor,
    audit_repos: AuditRepositories,
    signature_repos: SignatureRepositories,
}

impl SignatureSession {
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn audit_repos(&self) -> &AuditRepositories {
        &self.audit_repos
    }

    pub fn signature_repos(&self) -> &SignatureRepositories {
        &self.signature_repos
    }

    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self
            .executor
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self
            .executor
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        tx.rollback().await?;
        Ok(())
    }
}
