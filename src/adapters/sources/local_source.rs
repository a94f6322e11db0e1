use std::path::PathBuf;

use crate::core::errors::Result;
use crate::core::models::key::Key;
use crate::core::models::key_listing::KeyListing;
use crate::core::traits::key_source::KeySource;

/// Keys named explicitly on the command line: public key files and raw
/// key strings. These are shared as-is, without a selection prompt.
#[derive(Debug, Default)]
pub struct LocalKeySource {
    files: Vec<PathBuf>,
    raw_keys: Vec<String>,
}

impl LocalKeySource {
    pub fn new(files: Vec<PathBuf>, raw_keys: Vec<String>) -> Self {
        Self { files, raw_keys }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.raw_keys.is_empty()
    }
}

impl KeySource for LocalKeySource {
    fn name(&self) -> &str {
        "files and arguments"
    }

    fn needs_selection(&self) -> bool {
        false
    }

    /// Files first, then raw keys, each in the order given.
    fn fetch_keys(&mut self) -> Result<KeyListing> {
        let mut keys = Vec::with_capacity(self.files.len() + self.raw_keys.len());
        for path in &self.files {
            keys.push(Key::from_file(path)?);
        }
        for raw in &self.raw_keys {
            keys.push(Key::parse(raw, "")?);
        }
        Ok(KeyListing::new(keys))
    }
}
