pub mod append;
pub mod find_by_actor_id;
pub mod find_latest;
pub mod repo_impl;

pub use repo_impl::StateHistoryRepositoryImpl;
