use signature_core_api::{ApiError, ApiResult};
use signature_core_db::models::signature::{
    all_signed, completion_by_process, LinkedIdentityModel, SignatureStatusRow,
};
use signature_core_db::repository::{ExistByIds, LoadBatch, Page, PageRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::map_repo_error;
use crate::repository::signature::{
    ActorRepositoryImpl, LinkedIdentityRepositoryImpl, ProcessRepositoryImpl,
    SignatureRepositories,
};

/// Process-level reads over the actors of one or more processes.
///
/// Two evaluation paths exist for completion: the re-scan loads every
/// actor with its ledger head and reduces in memory, the batch path lets
/// the database evaluate [`all_signed_predicate`] for all candidates in one
/// query. Both treat a process without actors as all signed.
///
/// [`all_signed_predicate`]: crate::repository::signature::process_repository::all_signed_predicate
pub struct AggregateEngine {
    processes: Arc<ProcessRepositoryImpl>,
    actors: Arc<ActorRepositoryImpl>,
    linked_identities: Arc<LinkedIdentityRepositoryImpl>,
}

impl AggregateEngine {
    pub fn new(repos: &SignatureRepositories) -> Self {
        Self {
            processes: repos.process_repository.clone(),
            actors: repos.actor_repository.clone(),
            linked_identities: repos.linked_identity_repository.clone(),
        }
    }

    /// Full re-scan of one process
    pub async fn all_signed(&self, process_id: Uuid) -> ApiResult<bool> {
        self.ensure_process(process_id).await?;
        let listing = self
            .actors
            .list_by_process_id(process_id)
            .await
            .map_err(map_repo_error)?;
        Ok(all_signed(listing.iter().map(|l| l.state())))
    }

    /// Re-scan of several processes: one listing query, reduced per process.
    ///
    /// Results follow `process_ids`; unknown ids are reported as all signed.
    pub async fn all_signed_rescan(&self, process_ids: &[Uuid]) -> ApiResult<Vec<(Uuid, bool)>> {
        let listing = self
            .actors
            .list_by_process_ids(process_ids)
            .await
            .map_err(map_repo_error)?;
        Ok(completion_by_process(
            process_ids,
            listing.iter().map(|l| (l.actor.process_id, l.state())),
        ))
    }

    /// Completion evaluated by the database. Unknown ids are omitted.
    pub async fn all_signed_batch(&self, process_ids: &[Uuid]) -> ApiResult<Vec<(Uuid, bool)>> {
        self.processes
            .all_signed_batch(process_ids)
            .await
            .map_err(map_repo_error)
    }

    /// Processes whose completion equals `all_signed`, ordered by id
    pub async fn filter_by_completion(
        &self,
        all_signed: bool,
        page: PageRequest,
    ) -> ApiResult<Page<Uuid>> {
        let result = self
            .processes
            .find_ids_by_completion(all_signed, page)
            .await
            .map_err(map_repo_error)?;
        debug!(all_signed, total = result.total, "processes filtered by completion");
        Ok(result)
    }

    /// Read model of the signature status table, in roster order.
    ///
    /// Linked identities are loaded in one batch for the whole process.
    pub async fn status_table(&self, process_id: Uuid) -> ApiResult<Vec<SignatureStatusRow>> {
        self.ensure_process(process_id).await?;
        let listing = self
            .actors
            .list_by_process_id(process_id)
            .await
            .map_err(map_repo_error)?;

        let mut person_ids: Vec<Uuid> = listing.iter().filter_map(|l| l.actor.person_id).collect();
        person_ids.sort();
        person_ids.dedup();
        let persons: HashMap<Uuid, LinkedIdentityModel> = self
            .linked_identities
            .load_batch(&person_ids)
            .await
            .map_err(map_repo_error)?
            .into_iter()
            .flatten()
            .map(|p| (p.id, p))
            .collect();

        Ok(listing
            .iter()
            .map(|l| {
                let linked = l.actor.person_id.and_then(|id| persons.get(&id));
                SignatureStatusRow::from_listing(l, linked)
            })
            .collect())
    }

    async fn ensure_process(&self, process_id: Uuid) -> ApiResult<()> {
        let exists = self
            .processes
            .exist_by_ids(&[process_id])
            .await
            .map_err(map_repo_error)?;
        match exists.first() {
            Some((_, true)) => Ok(()),
            _ => Err(ApiError::NotFound(format!("Process {process_id}"))),
        }
    }
}
