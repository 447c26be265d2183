use signature_core_api::{ApiError, ApiResult, SigningSubmission};
use signature_core_db::models::audit::AuditLogModel;
use signature_core_db::models::signature::{ActorModel, StateHistoryModel};
use signature_core_db::repository::{LoadBatch, UpdateBatch};
use tracing::info;
use uuid::Uuid;

use super::{SignatureParent, WorkflowOrchestrator};
use crate::error::map_repo_error;
use crate::postgres_repositories::SignatureSession;
use crate::service::state_ledger::StateLedger;

impl<P: SignatureParent> WorkflowOrchestrator<P> {
    /// Records the decision posted by the signing page.
    ///
    /// The submission must carry exactly one decision indicator; anything
    /// else is a configuration error and nothing is written. A comment in
    /// the submission replaces the actor's comment.
    pub async fn trigger_transition(
        &self,
        session: &SignatureSession,
        actor_id: Uuid,
        submission: &SigningSubmission,
        updated_by: Option<Uuid>,
    ) -> ApiResult<StateHistoryModel> {
        let decision = submission.decision()?;

        if let Some(comment) = &submission.comment {
            update_actor(session, actor_id, updated_by, |actor| {
                actor.comment = comment.trim().to_string();
            })
            .await?;
        }

        let entry = StateLedger::new(session.signature_repos())
            .append(actor_id, decision.state())
            .await?;
        info!(
            parent = P::NAME,
            actor_id = %actor_id,
            decision = ?decision,
            "signature decision recorded"
        );
        Ok(entry)
    }

    /// Attaches the signed document and a comment without changing state
    pub async fn update_signing_details(
        &self,
        session: &SignatureSession,
        actor_id: Uuid,
        comment: &str,
        pdf_file: Option<Uuid>,
        updated_by: Option<Uuid>,
    ) -> ApiResult<ActorModel> {
        update_actor(session, actor_id, updated_by, |actor| {
            actor.comment = comment.trim().to_string();
            actor.pdf_file = pdf_file;
        })
        .await
    }
}

async fn update_actor<F>(
    session: &SignatureSession,
    actor_id: Uuid,
    updated_by: Option<Uuid>,
    change: F,
) -> ApiResult<ActorModel>
where
    F: FnOnce(&mut ActorModel),
{
    let actors = &session.signature_repos().actor_repository;
    let mut actor = actors
        .load_batch(&[actor_id])
        .await
        .map_err(map_repo_error)?
        .pop()
        .flatten()
        .ok_or_else(|| ApiError::NotFound(format!("Actor {actor_id}")))?;
    change(&mut actor);
    if !actor.is_modified().map_err(ApiError::InternalError)? {
        return Ok(actor);
    }

    let audit_log = AuditLogModel::new(updated_by);
    session
        .audit_repos()
        .audit_log_repository
        .create(&audit_log)
        .await
        .map_err(map_repo_error)?;
    let mut updated = actors
        .update_batch(vec![actor.clone()], Some(audit_log.id))
        .await
        .map_err(map_repo_error)?;
    Ok(updated.pop().unwrap_or(actor))
}
