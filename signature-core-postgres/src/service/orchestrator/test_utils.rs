use async_trait::async_trait;
use postgres_unit_of_work::Executor;
use signature_core_api::FieldError;
use std::error::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ParentStore, SignatureParent};

/// Parent with two independent rosters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thesis {
    pub title: String,
    pub jury: Option<Uuid>,
    pub special_jury: Option<Uuid>,
}

impl Thesis {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }
}

impl SignatureParent for Thesis {
    const NAME: &'static str = "Thesis";

    fn process_link_fields() -> &'static [&'static str] {
        &["jury", "special_jury"]
    }

    fn process_id(&self, link: &str) -> Option<Uuid> {
        match link {
            "jury" => self.jury,
            "special_jury" => self.special_jury,
            _ => None,
        }
    }

    fn set_process_id(&mut self, link: &str, process_id: Uuid) {
        match link {
            "jury" => self.jury = Some(process_id),
            "special_jury" => self.special_jury = Some(process_id),
            _ => {}
        }
    }

    fn validate(&self) -> Vec<FieldError> {
        if self.title.trim().is_empty() {
            vec![FieldError::new("title", "required", "This field is required")]
        } else {
            Vec::new()
        }
    }
}

/// Parent without any link field
pub struct Unlinked;

impl SignatureParent for Unlinked {
    const NAME: &'static str = "Unlinked";

    fn process_link_fields() -> &'static [&'static str] {
        &[]
    }

    fn process_id(&self, _link: &str) -> Option<Uuid> {
        None
    }

    fn set_process_id(&mut self, _link: &str, _process_id: Uuid) {}
}

/// Keeps every saved version of the parent
#[derive(Default)]
pub struct RecordingStore {
    pub saved: Mutex<Vec<Thesis>>,
}

#[async_trait]
impl ParentStore<Thesis> for RecordingStore {
    async fn save(&self, _executor: &Executor, parent: &Thesis) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.saved.lock().await.push(parent.clone());
        Ok(())
    }
}
