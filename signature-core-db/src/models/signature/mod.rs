pub mod actor;
pub mod actor_listing;
pub mod completion;
pub mod identity;
pub mod linked_identity;
pub mod process;
pub mod state_history;

pub use actor::ActorModel;
pub use actor_listing::{ActorListingModel, SignatureStatusRow};
pub use completion::{all_signed, completion_by_process};
pub use identity::{resolve_field, validate_identity, ResolvedIdentity};
pub use linked_identity::LinkedIdentityModel;
pub use process::ProcessModel;
pub use state_history::{current_state, StateHistoryModel};
