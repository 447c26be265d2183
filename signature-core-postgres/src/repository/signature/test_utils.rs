use chrono::NaiveDate;
use signature_core_api::domain::ActorInput;
use signature_core_db::models::audit::AuditLogModel;
use signature_core_db::models::signature::{ActorModel, LinkedIdentityModel, ProcessModel};
use std::error::Error;
use uuid::Uuid;

use super::LinkedIdentityRepositoryImpl;

pub fn create_test_audit_log() -> AuditLogModel {
    AuditLogModel::new(Some(Uuid::new_v4()))
}

pub fn create_test_process(field_ref: Option<&str>) -> ProcessModel {
    match field_ref {
        Some(field_ref) => ProcessModel::with_field_ref(field_ref).unwrap(),
        None => ProcessModel::new(),
    }
}

pub fn external_actor_input(first_name: &str) -> ActorInput {
    ActorInput {
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        language: "en".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1980, 1, 1),
        institute: "UCLouvain".to_string(),
        city: "Louvain-la-Neuve".to_string(),
        country: "BE".to_string(),
        ..Default::default()
    }
}

pub fn create_test_external_actor(process_id: Uuid, first_name: &str) -> ActorModel {
    ActorModel::from_input(process_id, &external_actor_input(first_name)).unwrap()
}

pub fn create_test_linked_actor(process_id: Uuid, person_id: Uuid) -> ActorModel {
    ActorModel::from_input(process_id, &ActorInput::linked(person_id)).unwrap()
}

/// Inserts a host identity record; the workflow itself never writes them
pub async fn insert_test_person(
    repo: &LinkedIdentityRepositoryImpl,
    first_name: &str,
    last_name: &str,
) -> Result<LinkedIdentityModel, Box<dyn Error + Send + Sync>> {
    let person = LinkedIdentityModel {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        language: "fr".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1975, 6, 15),
        country_of_citizenship: Some("FR".to_string()),
    };

    let mut tx = repo.executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
    sqlx::query(
        r#"
        INSERT INTO person (id, first_name, last_name, email, language, birth_date, country_of_citizenship)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(person.id)
    .bind(&person.first_name)
    .bind(&person.last_name)
    .bind(&person.email)
    .bind(&person.language)
    .bind(person.birth_date)
    .bind(person.country_of_citizenship.as_deref())
    .execute(&mut **transaction)
    .await?;

    Ok(person)
}
