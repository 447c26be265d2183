use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of one actor in a signature process.
///
/// `NotInvited` is implicit: it is never stored, an actor without any
/// state history entry is reported as not invited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "signature_state", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureState {
    #[default]
    NotInvited,
    Invited,
    Approved,
    Declined,
}

impl SignatureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureState::NotInvited => "NOT_INVITED",
            SignatureState::Invited => "INVITED",
            SignatureState::Approved => "APPROVED",
            SignatureState::Declined => "DECLINED",
        }
    }

    /// Human readable label used by status tables
    pub fn label(&self) -> &'static str {
        match self {
            SignatureState::NotInvited => "Not invited",
            SignatureState::Invited => "Invited",
            SignatureState::Approved => "Approved",
            SignatureState::Declined => "Declined",
        }
    }

    /// True once the actor took a decision
    pub fn is_decided(&self) -> bool {
        matches!(self, SignatureState::Approved | SignatureState::Declined)
    }
}

impl std::fmt::Display for SignatureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SignatureState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_INVITED" => Ok(SignatureState::NotInvited),
            "INVITED" => Ok(SignatureState::Invited),
            "APPROVED" => Ok(SignatureState::Approved),
            "DECLINED" => Ok(SignatureState::Declined),
            _ => Err(()),
        }
    }
}
