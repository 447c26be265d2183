use postgres_unit_of_work::Executor;
use signature_core_db::models::audit::AuditLogModel;
use std::error::Error;

pub struct AuditLogRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(
        &self,
        audit_log: &AuditLogModel,
    ) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, audit_log).await
    }
}
