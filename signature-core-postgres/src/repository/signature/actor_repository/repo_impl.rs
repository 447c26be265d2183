use postgres_unit_of_work::Executor;
use signature_core_api::SignatureState;
use signature_core_db::models::signature::{ActorListingModel, ActorModel};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use std::error::Error;

use crate::utils::{get_heapless_string, TryFromRow};

/// Column list shared by `signature_actor` and `signature_actor_audit`
pub(super) const ACTOR_COLUMNS: &str = "id, process_id, person_id, first_name, last_name, email, \
    language, birth_date, institute, city, country, comment, pdf_file, \
    antecedent_hash, antecedent_audit_log_id, hash, audit_log_id";

pub(super) const ACTOR_VALUES: &str =
    "$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17";

pub struct ActorRepositoryImpl {
    pub executor: Executor,
}

impl ActorRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

/// Binds every actor column in `ACTOR_COLUMNS` order, as `$1..$17`
pub(super) fn bind_actor<'q>(
    query: Query<'q, Postgres, PgArguments>,
    item: &'q ActorModel,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(item.id)
        .bind(item.process_id)
        .bind(item.person_id)
        .bind(item.first_name.as_str())
        .bind(item.last_name.as_str())
        .bind(item.email.as_str())
        .bind(item.language.as_str())
        .bind(item.birth_date)
        .bind(item.institute.as_str())
        .bind(item.city.as_str())
        .bind(item.country.as_str())
        .bind(item.comment.as_str())
        .bind(item.pdf_file)
        .bind(item.antecedent_hash)
        .bind(item.antecedent_audit_log_id)
        .bind(item.hash)
        .bind(item.audit_log_id)
}

impl TryFromRow<PgRow> for ActorModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ActorModel {
            id: row.try_get("id")?,
            process_id: row.try_get("process_id")?,
            person_id: row.try_get("person_id")?,
            first_name: get_heapless_string(row, "first_name")?,
            last_name: get_heapless_string(row, "last_name")?,
            email: get_heapless_string(row, "email")?,
            language: get_heapless_string(row, "language")?,
            birth_date: row.try_get("birth_date")?,
            institute: get_heapless_string(row, "institute")?,
            city: get_heapless_string(row, "city")?,
            country: get_heapless_string(row, "country")?,
            comment: row.try_get("comment")?,
            pdf_file: row.try_get("pdf_file")?,
            antecedent_hash: row.try_get("antecedent_hash")?,
            antecedent_audit_log_id: row.try_get("antecedent_audit_log_id")?,
            hash: row.try_get("hash")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

impl TryFromRow<PgRow> for ActorListingModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ActorListingModel {
            actor: ActorModel::try_from_row(row)?,
            last_state: row.try_get::<SignatureState, _>("last_state")?,
            last_state_at: row.try_get("last_state_at")?,
        })
    }
}
