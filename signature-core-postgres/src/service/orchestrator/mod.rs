//! Maps parent entities to signature processes.
//!
//! A [`WorkflowOrchestrator`] is built once per parent type and roster at
//! startup with [`setup`](WorkflowOrchestrator::setup); a bad link name
//! fails there, never at request time. Its operations then run inside the
//! caller's [`SignatureSession`](crate::SignatureSession) and only take
//! effect once the caller commits.

pub mod parent;
pub mod submit;
pub mod transition;
#[cfg(test)]
pub mod test_utils;

pub use parent::{ParentStore, SignatureParent};

use signature_core_api::ConfigurationError;
use std::marker::PhantomData;

/// Smallest roster accepted by `submit`
pub const MIN_ACTORS: usize = 1;

pub struct WorkflowOrchestrator<P: SignatureParent> {
    link: &'static str,
    _parent: PhantomData<fn() -> P>,
}

impl<P: SignatureParent> std::fmt::Debug for WorkflowOrchestrator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("parent", &P::NAME)
            .field("link", &self.link)
            .finish()
    }
}

impl<P: SignatureParent> WorkflowOrchestrator<P> {
    /// Resolves the link field holding the process id.
    ///
    /// Without a name the parent must declare exactly one link field.
    pub fn setup(link_name: Option<&str>) -> Result<Self, ConfigurationError> {
        let fields = P::process_link_fields();
        let link = match (link_name, fields) {
            (_, []) => return Err(ConfigurationError::MissingProcessLink { parent: P::NAME }),
            (None, [single]) => *single,
            (None, candidates) => {
                return Err(ConfigurationError::AmbiguousProcessLink {
                    parent: P::NAME,
                    candidates: candidates.join(", "),
                })
            }
            (Some(name), candidates) => candidates.iter().copied().find(|f| *f == name).ok_or_else(
                || ConfigurationError::UnknownProcessLink {
                    parent: P::NAME,
                    name: name.to_string(),
                },
            )?,
        };
        Ok(Self {
            link,
            _parent: PhantomData,
        })
    }

    pub fn link(&self) -> &'static str {
        self.link
    }
}
