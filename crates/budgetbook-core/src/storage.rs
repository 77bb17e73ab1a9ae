use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::CoreError;

/// String key-value persistence, the moral equivalent of browser local storage.
///
/// Every value is written whole; there is no partial update. Implementations
/// must make a successful `set` visible to the next `get` on the same handle.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local store, used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, String> {
        self.entries
            .lock()
            .map_err(|_| "memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self
            .lock()
            .map_err(|reason| CoreError::read_failed(key, reason))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self
            .lock()
            .map_err(|reason| CoreError::write_failed(key, reason))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .lock()
            .map_err(|reason| CoreError::write_failed(key, reason))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("dateFormat").unwrap(), None);

        store.set("dateFormat", "yyyy-MM-dd").unwrap();
        assert_eq!(store.get("dateFormat").unwrap().as_deref(), Some("yyyy-MM-dd"));

        store.set("dateFormat", "PPP").unwrap();
        assert_eq!(store.get("dateFormat").unwrap().as_deref(), Some("PPP"));

        store.remove("dateFormat").unwrap();
        assert_eq!(store.get("dateFormat").unwrap(), None);
    }

    #[test]
    fn memory_store_can_be_seeded() {
        let store = MemoryStore::with_entries([("primaryColor", "#123456")]);
        assert_eq!(store.get("primaryColor").unwrap().as_deref(), Some("#123456"));
    }
}
