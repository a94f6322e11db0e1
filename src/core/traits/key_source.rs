use crate::core::errors::Result;
use crate::core::models::key_listing::KeyListing;

/// Port for anything that can hand out public keys.
///
/// Implementations live in `adapters` (SSH agent, GitHub account, files).
pub trait KeySource {
    /// Human-readable name used in progress and error messages.
    fn name(&self) -> &str;

    /// Whether a human should pick from these keys, or take them all.
    fn needs_selection(&self) -> bool {
        true
    }

    /// Fetch every key the source currently offers, in source order.
    fn fetch_keys(&mut self) -> Result<KeyListing>;
}
