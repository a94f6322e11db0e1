use crate::core::errors::Result;
use crate::core::models::key::Key;

/// Port for choosing which keys to share.
pub trait KeySelector {
    /// Return the chosen subset of `keys`, in the order chosen.
    ///
    /// Fails when the choice is cancelled or nothing is chosen.
    fn select(&self, keys: &[Key]) -> Result<Vec<Key>>;
}

impl<T: KeySelector + ?Sized> KeySelector for Box<T> {
    fn select(&self, keys: &[Key]) -> Result<Vec<Key>> {
        (**self).select(keys)
    }
}
