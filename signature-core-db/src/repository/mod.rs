//! Generic batch repository traits.
//!
//! Implemented per entity by the storage crate; services depend on these
//! traits plus the entity-specific query methods of each repository.

pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load_audits;
pub mod load_batch;
pub mod pagination;
pub mod update_batch;

pub use create_batch::*;
pub use delete_batch::*;
pub use exist_by_ids::*;
pub use load_audits::*;
pub use load_batch::*;
pub use pagination::*;
pub use update_batch::*;
