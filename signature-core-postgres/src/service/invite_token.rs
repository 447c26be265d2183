//! Invite tokens bound to the ledger head of an actor.
//!
//! A token carries the actor id and the timestamp of the actor's latest
//! ledger entry at issuance. It only redeems while that entry is still the
//! latest one: any later append, including a new invite, revokes every
//! token issued before it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signature_core_api::{ApiError, ApiResult, SignatureState};
use signature_core_db::models::signature::ActorModel;
use signature_core_db::repository::LoadBatch;
use signature_core_db::signing::TokenSigner;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::map_repo_error;
use crate::repository::signature::{
    ActorRepositoryImpl, SignatureRepositories, StateHistoryRepositoryImpl,
};

use super::state_ledger::StateLedger;

/// Signed content of an invite token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitePayload {
    pub pk: Uuid,
    pub date: DateTime<Utc>,
}

pub struct InviteTokenService {
    signer: TokenSigner,
    actors: Arc<ActorRepositoryImpl>,
    history: Arc<StateHistoryRepositoryImpl>,
    ledger: StateLedger,
}

impl InviteTokenService {
    pub fn new(repos: &SignatureRepositories, signer: TokenSigner) -> Self {
        Self {
            signer,
            actors: repos.actor_repository.clone(),
            history: repos.state_history_repository.clone(),
            ledger: StateLedger::new(repos),
        }
    }

    /// Token for the actor's current ledger head.
    ///
    /// Fails with `NoHistory` while the actor has no ledger entry.
    pub async fn issue(&self, actor_id: Uuid) -> ApiResult<String> {
        self.load_actor(actor_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Actor {actor_id}")))?;
        let head = self
            .history
            .find_latest(actor_id)
            .await
            .map_err(map_repo_error)?
            .ok_or(ApiError::NoHistory(actor_id))?;

        let payload = InvitePayload {
            pk: actor_id,
            date: head.created_at,
        };
        let token = self
            .signer
            .dumps(&payload)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        info!(actor_id = %actor_id, state = %head.state, "invite token issued");
        Ok(token)
    }

    /// Records a new invitation and returns its token. Earlier tokens of the
    /// actor stop working.
    pub async fn send_invite(&self, actor_id: Uuid) -> ApiResult<String> {
        self.ledger.append(actor_id, SignatureState::Invited).await?;
        self.issue(actor_id).await
    }

    /// The actor a token was issued for, or `None`.
    ///
    /// Bad signatures, unknown actors and stale tokens all yield `None`; the
    /// reason is only logged. Storage failures are still returned as errors.
    pub async fn redeem(&self, token: &str) -> ApiResult<Option<ActorModel>> {
        let payload: InvitePayload = match self.signer.loads(token) {
            Ok(payload) => payload,
            Err(error) => {
                debug!(%error, "invite token rejected");
                return Ok(None);
            }
        };

        let Some(actor) = self.load_actor(payload.pk).await? else {
            debug!(actor_id = %payload.pk, "invite token rejected: unknown actor");
            return Ok(None);
        };

        let head = self
            .history
            .current_state_timestamp(actor.id)
            .await
            .map_err(map_repo_error)?;
        if head != Some(payload.date) {
            debug!(actor_id = %actor.id, issued_for = %payload.date, "invite token rejected: stale");
            return Ok(None);
        }

        Ok(Some(actor))
    }

    async fn load_actor(&self, actor_id: Uuid) -> ApiResult<Option<ActorModel>> {
        let mut loaded = self
            .actors
            .load_batch(&[actor_id])
            .await
            .map_err(map_repo_error)?;
        Ok(loaded.pop().flatten())
    }
}
