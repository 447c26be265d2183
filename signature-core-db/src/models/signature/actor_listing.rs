use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signature_core_api::domain::SignatureState;
use uuid::Uuid;

use super::actor::ActorModel;
use super::identity::ResolvedIdentity;
use super::linked_identity::LinkedIdentityModel;

/// # Documentation
/// An actor loaded through the listing query, with its ledger head computed
/// in the same query. Reading the state from here costs no further query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorListingModel {
    pub actor: ActorModel,
    pub last_state: SignatureState,
    /// None while the actor is not invited
    pub last_state_at: Option<DateTime<Utc>>,
}

impl ActorListingModel {
    pub fn state(&self) -> SignatureState {
        self.last_state
    }
}

/// Read model of one line of a signature status table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureStatusRow {
    pub actor_id: Uuid,
    pub process_id: Uuid,
    pub is_external: bool,
    pub identity: ResolvedIdentity,
    pub state: SignatureState,
    pub state_label: String,
    pub state_at: Option<DateTime<Utc>>,
    pub comment: String,
    pub pdf_file: Option<Uuid>,
}

impl SignatureStatusRow {
    pub fn from_listing(listing: &ActorListingModel, linked: Option<&LinkedIdentityModel>) -> Self {
        let actor = &listing.actor;
        Self {
            actor_id: actor.id,
            process_id: actor.process_id,
            is_external: actor.is_external(),
            identity: ResolvedIdentity::resolve(actor, linked),
            state: listing.last_state,
            state_label: listing.last_state.label().to_string(),
            state_at: listing.last_state_at,
            comment: actor.comment.clone(),
            pdf_file: actor.pdf_file,
        }
    }
}
