use postgres_unit_of_work::Executor;

/// Append-only access to `signature_state_history`.
///
/// No update or delete: entries disappear only with their actor.
pub struct StateHistoryRepositoryImpl {
    pub executor: Executor,
}

impl StateHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

pub(super) const HISTORY_COLUMNS: &str = "id, actor_id, state, created_at";
