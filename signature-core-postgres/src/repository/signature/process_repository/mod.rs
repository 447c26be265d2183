pub mod completion;
pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod find_ids_by_completion;
pub mod load_batch;
pub mod repo_impl;

pub use completion::all_signed_predicate;
pub use repo_impl::ProcessRepositoryImpl;
