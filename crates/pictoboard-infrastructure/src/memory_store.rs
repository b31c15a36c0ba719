//! In-memory key/value store.
//!
//! Backs tests and headless runs where nothing should touch the
//! filesystem. Same contract as [`JsonFileStore`](crate::JsonFileStore).

use std::collections::HashMap;
use std::sync::Mutex;

use pictoboard_core::error::{PictoError, Result};
use pictoboard_core::storage::KeyValueStore;

/// HashMap-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a value is stored under `key`. Test helper.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values
            .lock()
            .map(|values| values.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| PictoError::storage("memory store poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| PictoError::storage("memory store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| PictoError::storage("memory store poisoned"))?;
        values.remove(key);
        Ok(())
    }
}
