use postgres_unit_of_work::Executor;

/// Read access to `audit_link`.
///
/// Links are written by the audited repositories themselves, in the same
/// statement batch as the entity row.
pub struct AuditLinkRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLinkRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
