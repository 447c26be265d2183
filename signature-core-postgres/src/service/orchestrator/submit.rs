use signature_core_api::{
    ActorInput, ActorValidationError, ApiError, ApiResult, RosterError, SubmitErrors,
};
use signature_core_db::models::audit::AuditLogModel;
use signature_core_db::models::signature::{validate_identity, ActorModel, ProcessModel};
use signature_core_db::repository::{CreateBatch, DeleteBatch, ExistByIds, LoadBatch, UpdateBatch};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ParentStore, SignatureParent, WorkflowOrchestrator, MIN_ACTORS};
use crate::error::map_repo_error;
use crate::postgres_repositories::SignatureSession;

/// Roster checked against the stored process, ready to persist
struct PreparedRoster {
    /// None on first submission
    existing_process: Option<Uuid>,
    process: ProcessModel,
    creates: Vec<ActorModel>,
    updates: Vec<ActorModel>,
    deletes: Vec<Uuid>,
}

impl<P: SignatureParent> WorkflowOrchestrator<P> {
    /// Validates the parent and its roster together, then writes both.
    ///
    /// The first submission creates the process, tagged with the link name;
    /// later ones reuse it. Roster entries with an `id` update that actor,
    /// entries without one add an actor, and actors left out are deleted.
    /// Any validation error aborts before the first write and is returned
    /// as `ApiError::ValidationError`.
    ///
    /// Returns the process id, which is also set on `parent`.
    pub async fn submit<S>(
        &self,
        session: &SignatureSession,
        parent: &mut P,
        roster: &[ActorInput],
        store: &S,
        updated_by: Option<Uuid>,
    ) -> ApiResult<Uuid>
    where
        S: ParentStore<P> + ?Sized,
    {
        let prepared = self.prepare(session, parent, roster).await?;
        let process_id = prepared.process.id;
        let repos = session.signature_repos();

        if prepared.existing_process.is_none() {
            repos
                .process_repository
                .create_batch(vec![prepared.process], None)
                .await
                .map_err(map_repo_error)?;
        }

        let (created, updated, deleted) =
            (prepared.creates.len(), prepared.updates.len(), prepared.deletes.len());
        if created + updated + deleted > 0 {
            self.write_roster(session, prepared, updated_by).await?;
        }

        parent.set_process_id(self.link, process_id);
        store
            .save(session.executor(), parent)
            .await
            .map_err(map_repo_error)?;

        info!(
            parent = P::NAME,
            link = self.link,
            process_id = %process_id,
            created,
            updated,
            deleted,
            "signature roster submitted"
        );
        Ok(process_id)
    }

    /// Actor writes of one submission, all under a single audit log
    async fn write_roster(
        &self,
        session: &SignatureSession,
        prepared: PreparedRoster,
        updated_by: Option<Uuid>,
    ) -> ApiResult<()> {
        let repos = session.signature_repos();
        let audit_log = AuditLogModel::new(updated_by);
        session
            .audit_repos()
            .audit_log_repository
            .create(&audit_log)
            .await
            .map_err(map_repo_error)?;

        repos
            .actor_repository
            .delete_batch(&prepared.deletes, Some(audit_log.id))
            .await
            .map_err(map_repo_error)?;
        repos
            .actor_repository
            .update_batch(prepared.updates, Some(audit_log.id))
            .await
            .map_err(map_repo_error)?;
        repos
            .actor_repository
            .create_batch(prepared.creates, Some(audit_log.id))
            .await
            .map_err(map_repo_error)?;
        Ok(())
    }

    async fn prepare(
        &self,
        session: &SignatureSession,
        parent: &P,
        roster: &[ActorInput],
    ) -> ApiResult<PreparedRoster> {
        let repos = session.signature_repos();
        let mut errors = SubmitErrors {
            parent: parent.validate(),
            ..Default::default()
        };
        if roster.len() < MIN_ACTORS {
            errors.roster.push(RosterError::MinActors {
                min: MIN_ACTORS,
                actual: roster.len(),
            });
        }

        let existing_process = parent.process_id(self.link);
        let (process, mut stored): (ProcessModel, HashMap<Uuid, ActorModel>) =
            match existing_process {
                Some(process_id) => {
                    let exists = repos
                        .process_repository
                        .exist_by_ids(&[process_id])
                        .await
                        .map_err(map_repo_error)?;
                    if !matches!(exists.first(), Some((_, true))) {
                        return Err(ApiError::NotFound(format!("Process {process_id}")));
                    }
                    let actors = repos
                        .actor_repository
                        .find_by_process_id(process_id)
                        .await
                        .map_err(map_repo_error)?;
                    let process = ProcessModel {
                        id: process_id,
                        field_ref: None,
                    };
                    (process, actors.into_iter().map(|a| (a.id, a)).collect())
                }
                None => {
                    let process =
                        ProcessModel::with_field_ref(self.link).map_err(ApiError::InternalError)?;
                    (process, HashMap::new())
                }
            };
        let stored_ids: Vec<Uuid> = stored.keys().copied().collect();

        let mut creates = Vec::new();
        let mut updates = Vec::new();
        let mut kept = HashSet::new();
        let mut linked_rows = Vec::new();
        for (row, input) in roster.iter().enumerate() {
            let mut row_errors = input.format_errors();
            if !row_errors.is_empty() {
                errors.push_actor_errors(row, row_errors);
                continue;
            }

            let actor = match input.id {
                Some(actor_id) => match stored.remove(&actor_id) {
                    Some(mut actor) => {
                        kept.insert(actor_id);
                        actor.apply_input(input).map(|()| actor)
                    }
                    None => {
                        errors.roster.push(RosterError::UnknownActor { row, actor_id });
                        continue;
                    }
                },
                None => ActorModel::from_input(process.id, input),
            };
            let actor = match actor {
                Ok(actor) => actor,
                Err(error) => {
                    errors.push_actor_errors(row, vec![error]);
                    continue;
                }
            };
            if let Err(error) = validate_identity(&actor) {
                row_errors.push(error);
                errors.push_actor_errors(row, row_errors);
                continue;
            }

            if let Some(person_id) = actor.person_id {
                linked_rows.push((row, person_id));
            }
            if input.id.is_none() {
                creates.push(actor);
            } else if actor.is_modified().map_err(ApiError::InternalError)? {
                updates.push(actor);
            }
        }

        let person_ids: Vec<Uuid> = linked_rows.iter().map(|(_, id)| *id).collect();
        let persons = repos
            .linked_identity_repository
            .load_batch(&person_ids)
            .await
            .map_err(map_repo_error)?;
        for ((row, person_id), person) in linked_rows.into_iter().zip(persons) {
            if person.is_none() {
                errors.push_actor_errors(
                    row,
                    vec![ActorValidationError::UnknownPerson { person_id }],
                );
            }
        }

        if !errors.is_empty() {
            debug!(parent = P::NAME, link = self.link, %errors, "signature roster rejected");
        }
        errors.into_result()?;

        let deletes = stored_ids.into_iter().filter(|id| !kept.contains(id)).collect();
        Ok(PreparedRoster {
            existing_process,
            process,
            creates,
            updates,
            deletes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{RecordingStore, Thesis};
    use super::*;
    use crate::repository::signature::test_utils::{external_actor_input, insert_test_person};
    use crate::service::AggregateEngine;
    use crate::test_helper::setup_test_context;
    use signature_core_api::{ActorValidationError, SignatureState};
    use signature_core_db::repository::LoadBatch;

    #[tokio::test]
    async fn test_first_submission_creates_process() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let jane = insert_test_person(&repos.linked_identity_repository, "Jane", "Smith").await?;
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let john = ActorInput {
            email: "foo@bar.com".to_string(),
            ..external_actor_input("John")
        };
        let roster = vec![john, ActorInput::linked(jane.id)];
        let process_id = orchestrator
            .submit(&ctx.session, &mut thesis, &roster, &store, None)
            .await?;

        assert_eq!(thesis.jury, Some(process_id));
        assert_eq!(thesis.special_jury, None);
        assert_eq!(store.saved.lock().await.as_slice(), &[thesis.clone()]);

        let process = repos.process_repository.load_batch(&[process_id]).await?;
        let field_ref = process[0].as_ref().and_then(|p| p.field_ref.clone());
        assert_eq!(field_ref.as_deref(), Some("jury"));

        let actors = repos.actor_repository.find_by_process_id(process_id).await?;
        assert_eq!(actors.len(), 2);
        assert!(actors[0].is_external());
        assert_eq!(actors[1].person_id, Some(jane.id));

        // Nobody signed yet
        let engine = AggregateEngine::new(repos);
        assert!(!engine.all_signed(process_id).await?);
        for actor in &actors {
            repos
                .state_history_repository
                .append(actor.id, SignatureState::Approved)
                .await?;
        }
        assert!(engine.all_signed(process_id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_resubmission_replaces_roster() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let roster = vec![external_actor_input("Anna"), external_actor_input("Bert")];
        let process_id = orchestrator
            .submit(&ctx.session, &mut thesis, &roster, &store, None)
            .await?;
        let actors = repos.actor_repository.find_by_process_id(process_id).await?;

        // Keep Anna with a new city, drop Bert, add Cleo
        let mut anna = external_actor_input("Anna");
        anna.id = Some(actors[0].id);
        anna.city = "Namur".to_string();
        let roster = vec![anna, external_actor_input("Cleo")];
        let second = orchestrator
            .submit(&ctx.session, &mut thesis, &roster, &store, None)
            .await?;
        assert_eq!(second, process_id);

        let actors_after = repos.actor_repository.find_by_process_id(process_id).await?;
        let names: Vec<_> = actors_after.iter().map(|a| a.first_name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Cleo"]);
        assert_eq!(actors_after[0].id, actors[0].id);
        assert_eq!(actors_after[0].city.as_str(), "Namur");

        let exists = repos.actor_repository.exist_by_ids(&[actors[1].id]).await?;
        assert_eq!(exists, vec![(actors[1].id, false)]);

        // Created then updated, created then deleted
        let links = &ctx.audit_repos().audit_link_repository;
        assert_eq!(links.find_by_entity_id(actors[0].id).await?.len(), 2);
        assert_eq!(links.find_by_entity_id(actors[1].id).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_independent_rosters() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let jury = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let special_jury = WorkflowOrchestrator::<Thesis>::setup(Some("special_jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let jury_id = jury
            .submit(&ctx.session, &mut thesis, &[external_actor_input("Anna")], &store, None)
            .await?;
        let special_id = special_jury
            .submit(
                &ctx.session,
                &mut thesis,
                &[external_actor_input("Bert"), external_actor_input("Cleo")],
                &store,
                None,
            )
            .await?;

        assert_ne!(jury_id, special_id);
        assert_eq!(thesis.jury, Some(jury_id));
        assert_eq!(thesis.special_jury, Some(special_id));
        assert_eq!(repos.actor_repository.find_by_process_id(jury_id).await?.len(), 1);
        assert_eq!(repos.actor_repository.find_by_process_id(special_id).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("");

        let partial = ActorInput {
            email: "foo@bar.com".to_string(),
            ..Default::default()
        };
        let roster = vec![external_actor_input("Anna"), partial, ActorInput::default()];
        let result = orchestrator
            .submit(&ctx.session, &mut thesis, &roster, &store, None)
            .await;

        let errors = match result {
            Err(ApiError::ValidationError(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        };
        assert_eq!(errors.parent.len(), 1);
        assert_eq!(errors.actors.len(), 2);
        assert_eq!(errors.actors[0].row, 1);
        assert_eq!(errors.actors[0].errors[0].code(), "ACTOR_INCOMPLETE_EXTERNAL_DATA");
        assert_eq!(errors.actors[1].errors, vec![ActorValidationError::DataRequired]);

        assert_eq!(thesis.jury, None);
        assert!(store.saved.lock().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_roster_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let result = orchestrator
            .submit(&ctx.session, &mut thesis, &[], &store, None)
            .await;

        match result {
            Err(ApiError::ValidationError(errors)) => {
                assert_eq!(errors.roster, vec![RosterError::MinActors { min: 1, actual: 0 }]);
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
        assert!(store.saved.lock().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_actor_id_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");
        orchestrator
            .submit(&ctx.session, &mut thesis, &[external_actor_input("Anna")], &store, None)
            .await?;

        let mut stranger = external_actor_input("Bert");
        let actor_id = Uuid::new_v4();
        stranger.id = Some(actor_id);
        let result = orchestrator
            .submit(&ctx.session, &mut thesis, &[stranger], &store, None)
            .await;

        match result {
            Err(ApiError::ValidationError(errors)) => {
                assert_eq!(errors.roster, vec![RosterError::UnknownActor { row: 0, actor_id }]);
            }
            other => panic!("expected validation errors, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_person_is_a_row_error() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let person_id = Uuid::new_v4();
        let roster = vec![external_actor_input("Anna"), ActorInput::linked(person_id)];
        let result = orchestrator
            .submit(&ctx.session, &mut thesis, &roster, &store, None)
            .await;

        match result {
            Err(ApiError::ValidationError(errors)) => {
                assert!(errors.roster.is_empty());
                assert_eq!(errors.actors.len(), 1);
                assert_eq!(errors.actors[0].row, 1);
                assert_eq!(
                    errors.actors[0].errors,
                    vec![ActorValidationError::UnknownPerson { person_id }]
                );
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
        assert_eq!(thesis.jury, None);
        assert!(store.saved.lock().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_unchanged_resubmission_writes_no_audit() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.signature_repos();
        let orchestrator = WorkflowOrchestrator::<Thesis>::setup(Some("jury"))?;
        let store = RecordingStore::default();
        let mut thesis = Thesis::new("On signatures");

        let process_id = orchestrator
            .submit(&ctx.session, &mut thesis, &[external_actor_input("Anna")], &store, None)
            .await?;
        let actors = repos.actor_repository.find_by_process_id(process_id).await?;

        let mut anna = external_actor_input("Anna");
        anna.id = Some(actors[0].id);
        orchestrator
            .submit(&ctx.session, &mut thesis, &[anna], &store, None)
            .await?;

        let actors_after = repos.actor_repository.find_by_process_id(process_id).await?;
        assert_eq!(actors_after, actors);
        let links = &ctx.audit_repos().audit_link_repository;
        assert_eq!(links.find_by_entity_id(actors[0].id).await?.len(), 1);

        Ok(())
    }
}
