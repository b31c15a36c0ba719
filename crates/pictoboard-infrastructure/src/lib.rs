//! Infrastructure for pictoboard: the file-backed key/value store, the
//! recognition webhook client with its wire DTOs, settings, and platform
//! paths.

pub mod json_store;
pub mod memory_store;
pub mod paths;
pub mod settings;
pub mod webhook;

pub use crate::json_store::JsonFileStore;
pub use crate::memory_store::MemoryStore;
pub use crate::settings::Settings;
pub use crate::webhook::WebhookClient;
