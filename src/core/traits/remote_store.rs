use crate::core::errors::{Result, SshareError};
use crate::core::models::upload::Publication;

/// Port for publishing an authorized_keys body somewhere reachable.
///
/// Implementations live in `adapters::stores` (transfer.sh-style PUT
/// store, Pastebin-style paste API). Each one is configured up front, so
/// `publish` only needs the text.
pub trait RemoteStore {
    /// Human-readable name of this store (e.g. "transfer.sh", "pastebin").
    fn name(&self) -> &str;

    /// Upload `data` and return where it can be fetched from.
    fn publish(&self, data: &str) -> Result<Publication>;

    /// Remove previously published content before it expires.
    fn delete(&self, _locator: &str, _credential: &str) -> Result<()> {
        Err(SshareError::Unsupported {
            store: self.name().to_string(),
            operation: "deletion",
        })
    }
}
