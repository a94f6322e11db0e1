use crate::core::errors::{Result, SshareError};
use crate::core::models::key::{Key, render_authorized_keys};
use crate::core::models::upload::Publication;
use crate::core::traits::key_source::KeySource;
use crate::core::traits::remote_store::RemoteStore;
use crate::core::traits::selector::KeySelector;

/// Collects keys from several sources and publishes the chosen ones.
///
/// Sources are read one after another. Keys from sources that need a
/// selection pass through the selector; the others are kept whole. Any
/// failure stops the run before anything is uploaded.
pub struct ShareService<S: KeySelector> {
    pub selector: S,
    chosen: Vec<Key>,
    warnings: Vec<SshareError>,
}

impl<S: KeySelector> ShareService<S> {
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            chosen: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Read `source` and add its (selected) keys. Returns how many were added.
    pub fn collect_from(&mut self, source: &mut dyn KeySource) -> Result<usize> {
        let listing = source.fetch_keys()?;
        if let Some(warning) = listing.warning {
            self.warnings.push(warning);
        }
        if listing.keys.is_empty() {
            return Ok(0);
        }

        let keys = if source.needs_selection() {
            self.selector.select(&listing.keys)?
        } else {
            listing.keys
        };
        let added = keys.len();
        self.chosen.extend(keys);
        Ok(added)
    }

    pub fn keys(&self) -> &[Key] {
        &self.chosen
    }

    /// Non-fatal problems met while collecting (e.g. agent re-lock failures).
    pub fn take_warnings(&mut self) -> Vec<SshareError> {
        std::mem::take(&mut self.warnings)
    }

    /// The authorized_keys body for the collected keys.
    pub fn authorized_keys(&self) -> Result<String> {
        if self.chosen.is_empty() {
            return Err(SshareError::Selection {
                reason: "No keys were selected".into(),
            });
        }
        Ok(render_authorized_keys(&self.chosen))
    }

    /// Render the collected keys and publish them to `store`.
    pub fn publish(&self, store: &dyn RemoteStore) -> Result<Publication> {
        let body = self.authorized_keys()?;
        store.publish(&body)
    }
}
