use postgres_unit_of_work::Executor;
use signature_core_db::models::signature::ProcessModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::utils::{get_optional_heapless_string, TryFromRow};

pub struct ProcessRepositoryImpl {
    pub executor: Executor,
}

impl ProcessRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ProcessModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ProcessModel {
            id: row.try_get("id")?,
            field_ref: get_optional_heapless_string(row, "field_ref")?,
        })
    }
}
