use async_trait::async_trait;
use postgres_unit_of_work::Executor;
use signature_core_api::FieldError;
use std::error::Error;
use uuid::Uuid;

/// An entity of the host application owning one or more actor rosters.
///
/// Each roster is reached through a named link field holding the id of a
/// signature process, e.g. `jury` and `special_jury` on a thesis.
pub trait SignatureParent: Send + Sync {
    /// Used in configuration errors
    const NAME: &'static str;

    /// Names of every field that may hold a process id
    fn process_link_fields() -> &'static [&'static str];

    /// None until the roster behind `link` is submitted for the first time
    fn process_id(&self, link: &str) -> Option<Uuid>;

    fn set_process_id(&mut self, link: &str, process_id: Uuid);

    /// Field errors of the parent's own data
    fn validate(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

/// Persists parent entities inside the submitting transaction
#[async_trait]
pub trait ParentStore<P: SignatureParent>: Send + Sync {
    async fn save(&self, executor: &Executor, parent: &P) -> Result<(), Box<dyn Error + Send + Sync>>;
}
