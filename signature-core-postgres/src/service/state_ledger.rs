use chrono::{DateTime, Utc};
use signature_core_api::{ApiError, ApiResult, SignatureState};
use signature_core_db::models::signature::StateHistoryModel;
use signature_core_db::repository::ExistByIds;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::map_repo_error;
use crate::repository::signature::{
    ActorRepositoryImpl, SignatureRepositories, StateHistoryRepositoryImpl,
};

/// Append-only history of actor states
pub struct StateLedger {
    actors: Arc<ActorRepositoryImpl>,
    history: Arc<StateHistoryRepositoryImpl>,
}

impl StateLedger {
    pub fn new(repos: &SignatureRepositories) -> Self {
        Self {
            actors: repos.actor_repository.clone(),
            history: repos.state_history_repository.clone(),
        }
    }

    /// Records `state` as the actor's new current state.
    ///
    /// Transitions are not checked: any state may follow any other.
    pub async fn append(&self, actor_id: Uuid, state: SignatureState) -> ApiResult<StateHistoryModel> {
        self.ensure_actor(actor_id).await?;
        let entry = self
            .history
            .append(actor_id, state)
            .await
            .map_err(map_repo_error)?;
        info!(actor_id = %actor_id, state = %state, "signature state appended");
        Ok(entry)
    }

    /// `NotInvited` for an actor without history
    pub async fn current_state(&self, actor_id: Uuid) -> ApiResult<SignatureState> {
        self.history
            .current_state(actor_id)
            .await
            .map_err(map_repo_error)
    }

    pub async fn current_state_timestamp(&self, actor_id: Uuid) -> ApiResult<Option<DateTime<Utc>>> {
        self.history
            .current_state_timestamp(actor_id)
            .await
            .map_err(map_repo_error)
    }

    /// Every entry of the actor, oldest first
    pub async fn history(&self, actor_id: Uuid) -> ApiResult<Vec<StateHistoryModel>> {
        self.history
            .find_by_actor_id(actor_id)
            .await
            .map_err(map_repo_error)
    }

    async fn ensure_actor(&self, actor_id: Uuid) -> ApiResult<()> {
        let exists = self
            .actors
            .exist_by_ids(&[actor_id])
            .await
            .map_err(map_repo_error)?;
        match exists.first() {
            Some((_, true)) => Ok(()),
            _ => Err(ApiError::NotFound(format!("Actor {actor_id}"))),
        }
    }
}
