use serde::{Deserialize, Serialize};

use super::signature_state::SignatureState;
use crate::error::ConfigurationError;

/// Outcome chosen by an actor on the signing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Declined,
}

impl Decision {
    pub fn state(self) -> SignatureState {
        match self {
            Decision::Approved => SignatureState::Approved,
            Decision::Declined => SignatureState::Declined,
        }
    }
}

/// Data posted by the signing page.
///
/// `submitted` holds the values of every `submitted` button that reached the
/// server; a well formed page sends exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningSubmission {
    pub submitted: Vec<String>,
    pub comment: Option<String>,
}

impl SigningSubmission {
    pub fn new(submitted: &str) -> Self {
        Self {
            submitted: vec![submitted.to_string()],
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn decision(&self) -> Result<Decision, ConfigurationError> {
        match self.submitted.as_slice() {
            [] => Err(ConfigurationError::MissingDecisionIndicator),
            [value] => match value.trim() {
                "approved" => Ok(Decision::Approved),
                "declined" => Ok(Decision::Declined),
                other => Err(ConfigurationError::UnknownDecision(other.to_string())),
            },
            values => Err(ConfigurationError::AmbiguousDecision(values.len())),
        }
    }
}
