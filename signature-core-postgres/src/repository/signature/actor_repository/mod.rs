pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod find_by_process_id;
pub mod list_by_process_ids;
pub mod load_audits;
pub mod load_batch;
pub mod repo_impl;
pub mod update_batch;

pub use repo_impl::ActorRepositoryImpl;
