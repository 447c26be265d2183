pub mod config;
pub mod error;
pub mod postgres_repositories;
pub mod repository;
pub mod service;
pub mod utils;

pub use config::SignatureConfig;
pub use error::map_repo_error;
pub use postgres_repositories::{PostgresRepositories, SignatureSession};
pub use service::{
    AggregateEngine, InvitePayload, InviteTokenService, ParentStore, SignatureParent, StateLedger,
    WorkflowOrchestrator,
};

#[cfg(test)]
pub mod test_helper;
