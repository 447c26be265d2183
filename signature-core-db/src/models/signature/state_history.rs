use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signature_core_api::domain::SignatureState;
use sqlx::FromRow;
use uuid::Uuid;

/// # Documentation
/// One immutable entry of an actor's state ledger.
///
/// - Rows are only ever inserted, never updated or deleted (except through
///   the cascade of their actor).
/// - `created_at` is assigned by the server and strictly increases per actor;
///   `id` breaks ties between actors and keeps insertion order.
/// - The latest entry is the actor's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StateHistoryModel {
    pub id: i64,
    pub actor_id: Uuid,
    pub state: SignatureState,
    pub created_at: DateTime<Utc>,
}

/// State of the latest entry, `NotInvited` for an empty ledger
pub fn current_state(entries: &[StateHistoryModel]) -> SignatureState {
    entries
        .iter()
        .max_by_key(|entry| (entry.created_at, entry.id))
        .map(|entry| entry.state)
        .unwrap_or(SignatureState::NotInvited)
}
