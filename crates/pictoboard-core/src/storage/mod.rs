//! Durable key/value storage boundary.
//!
//! All higher-level values are encoded to/decoded from JSON text before
//! crossing this boundary. The codec helpers here implement the tolerant
//! read discipline: a stored value that fails to decode is logged and
//! treated as absent, so callers fall back to a default instead of failing.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Storage keys for every persisted value in the session core.
pub mod keys {
    /// Ordered list of menu entries.
    pub const MENU_ITEMS: &str = "menu.items";
    /// Menu title string.
    pub const MENU_TITLE: &str = "menu.title";
    /// Last active primary view identifier.
    pub const LAST_ACTIVE_VIEW: &str = "view.last_active";
    /// Last free-text search query.
    pub const LAST_SEARCH_QUERY: &str = "search.last_query";
    /// Last search result descriptors.
    pub const LAST_SEARCH_RESULTS: &str = "search.last_results";
    /// Last image-recognition result descriptors.
    pub const LAST_UPLOAD_RESULTS: &str = "upload.last_results";
    /// Entry selected for the compose view.
    pub const SELECTED_ENTRY: &str = "compose.selected";
}

/// Durable key/value read-write over string values.
///
/// Writes are synchronous from the caller's perspective and idempotent per
/// key. A single logical writer is assumed (last-writer-wins, no locking).
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing an absent key is a
    /// no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and decodes a JSON value from the store.
///
/// Returns `None` when the key is absent, when the store itself fails, or
/// when the stored text fails to decode. Failures are logged, never
/// propagated: the session core substitutes defaults instead.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.read(key) {
        Ok(raw) => raw?,
        Err(err) => {
            tracing::warn!("failed to read '{key}' from storage: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("stored value under '{key}' failed to decode, treating as absent: {err}");
            None
        }
    }
}

/// Like [`read_json`], falling back to `T::default()` when absent or
/// undecodable.
pub fn read_json_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> T {
    read_json(store, key).unwrap_or_default()
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    store.write(key, &encoded)
}
