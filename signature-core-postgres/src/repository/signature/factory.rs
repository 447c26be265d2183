use postgres_unit_of_work::Executor;
use std::sync::Arc;

use super::{
    ActorRepositoryImpl, LinkedIdentityRepositoryImpl, ProcessRepositoryImpl,
    StateHistoryRepositoryImpl,
};

/// Builds the signature repositories on a shared executor
#[derive(Default)]
pub struct SignatureRepoFactory;

impl SignatureRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    pub fn build_process_repo(&self, executor: &Executor) -> Arc<ProcessRepositoryImpl> {
        Arc::new(ProcessRepositoryImpl::new(executor.clone()))
    }

    pub fn build_actor_repo(&self, executor: &Executor) -> Arc<ActorRepositoryImpl> {
        Arc::new(ActorRepositoryImpl::new(executor.clone()))
    }

    pub fn build_state_history_repo(&self, executor: &Executor) -> Arc<StateHistoryRepositoryImpl> {
        Arc::new(StateHistoryRepositoryImpl::new(executor.clone()))
    }

    pub fn build_linked_identity_repo(
        &self,
        executor: &Executor,
    ) -> Arc<LinkedIdentityRepositoryImpl> {
        Arc::new(LinkedIdentityRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> SignatureRepositories {
        SignatureRepositories {
            process_repository: self.build_process_repo(executor),
            actor_repository: self.build_actor_repo(executor),
            state_history_repository: self.build_state_history_repo(executor),
            linked_identity_repository: self.build_linked_identity_repo(executor),
        }
    }
}

/// All signature repositories of one transaction
#[derive(Clone)]
pub struct SignatureRepositories {
    pub process_repository: Arc<ProcessRepositoryImpl>,
    pub actor_repository: Arc<ActorRepositoryImpl>,
    pub state_history_repository: Arc<StateHistoryRepositoryImpl>,
    pub linked_identity_repository: Arc<LinkedIdentityRepositoryImpl>,
}
