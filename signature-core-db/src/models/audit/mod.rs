pub mod audit_link;
pub mod audit_log;
pub mod entity_type;

pub use audit_link::AuditLinkModel;
pub use audit_log::AuditLogModel;
pub use entity_type::EntityType;
