//! Workflow services. Every service works on the repositories of one
//! [`SignatureSession`](crate::SignatureSession); the caller commits.

pub mod aggregate;
pub mod invite_token;
pub mod orchestrator;
pub mod state_ledger;

pub use aggregate::AggregateEngine;
pub use invite_token::{InvitePayload, InviteTokenService};
pub use orchestrator::{ParentStore, SignatureParent, WorkflowOrchestrator};
pub use state_ledger::StateLedger;
