//! Key-value storage seam used by the theme provider and to-do persistence.
//!
//! [`MemoryStore`] lives here; the durable JSON-file store lives in the
//! `formwork-store` crate.

use std::collections::BTreeMap;
use std::convert::Infallible;

/// String-keyed, string-valued persistence.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Returns true if the key was present.
    fn remove(&mut self, key: &str) -> Result<bool, Self::Error>;
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, Self::Error> {
        Ok(self.entries.remove(key).is_some())
    }
}

impl<S: KeyValueStore> KeyValueStore for &mut S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool, Self::Error> {
        (**self).remove(key)
    }
}
