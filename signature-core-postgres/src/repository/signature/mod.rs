pub mod actor_repository;
pub mod factory;
pub mod linked_identity_repository;
pub mod process_repository;
pub mod state_history_repository;
#[cfg(test)]
pub mod test_utils;

pub use actor_repository::ActorRepositoryImpl;
pub use factory::{SignatureRepoFactory, SignatureRepositories};
pub use linked_identity_repository::LinkedIdentityRepositoryImpl;
pub use process_repository::ProcessRepositoryImpl;
pub use state_history_repository::StateHistoryRepositoryImpl;
