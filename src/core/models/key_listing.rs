use crate::core::errors::SshareError;
use crate::core::models::key::Key;

/// Keys obtained from a source, plus an optional non-fatal follow-up failure.
///
/// The SSH agent source re-locks the agent after listing. When that fails
/// the keys are still good, and the failure travels here as `warning`.
#[derive(Debug, Default)]
pub struct KeyListing {
    pub keys: Vec<Key>,
    pub warning: Option<SshareError>,
}

impl KeyListing {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            warning: None,
        }
    }

    pub fn with_warning(self, warning: SshareError) -> Self {
        Self {
            warning: Some(warning),
            ..self
        }
    }
}
