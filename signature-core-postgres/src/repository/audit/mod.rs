pub mod audit_link_repository;
pub mod audit_log_repository;
pub mod factory;

pub use factory::{AuditRepoFactory, AuditRepositories};
