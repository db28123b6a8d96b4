//! Process-local `SessionStore` for CLI tooling and tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{SessionStore, SessionStoreError};

/// Key/value session held in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SessionStoreError::read("session lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: String) -> Result<(), SessionStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SessionStoreError::write("session lock poisoned"))?;
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_load_remove() {
        let session = InMemorySessionStore::new();
        assert_eq!(session.load("evo-user").expect("load"), None);

        session
            .store("evo-user", "{}".to_owned())
            .expect("store");
        assert_eq!(session.load("evo-user").expect("load").as_deref(), Some("{}"));

        session.remove("evo-user");
        session.remove("evo-user");
        assert_eq!(session.load("evo-user").expect("load"), None);
    }
}
