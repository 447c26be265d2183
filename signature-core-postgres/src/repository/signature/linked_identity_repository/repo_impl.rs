use postgres_unit_of_work::Executor;

/// Read-only lookup of the host application's identity records
pub struct LinkedIdentityRepositoryImpl {
    pub executor: Executor,
}

impl LinkedIdentityRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
