use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::repository::pagination::{Page, PageRequest};

/// Pages through the audit trail of one entity, most recent version first.
///
/// # Example
/// ```ignore
/// let page = actor_repo.load_audits(actor_id, PageRequest::new(20, 0)).await?;
/// for version in &page.items {
///     println!("{} {}", version.audit_log_id.unwrap_or_default(), version);
/// }
/// ```
#[async_trait]
pub trait LoadAudits<DB: Database, T: Auditable>: Send + Sync {
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
