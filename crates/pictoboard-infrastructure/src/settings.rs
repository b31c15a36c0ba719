//! Application settings.
//!
//! Loaded from `<config_dir>/pictoboard/config.toml`. A missing or empty
//! file yields the defaults; a file that exists but cannot be parsed is an
//! error (the user asked for something and we could not honor it).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pictoboard_core::error::{PictoError, Result};

use crate::paths;

/// Default endpoint mapping a free-text query to pictogram candidates.
pub const DEFAULT_SEARCH_URL: &str = "https://pulpo.website/webhook/buscar_pictograma";
/// Default endpoint mapping an uploaded image to pictogram candidates.
pub const DEFAULT_UPLOAD_URL: &str = "https://pulpo.website/webhook/send_image";

/// User-tunable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Recognition collaborator endpoint for text search.
    pub search_url: String,
    /// Recognition collaborator endpoint for image upload.
    pub upload_url: String,
    /// Override for the key/value store directory.
    pub store_dir: Option<PathBuf>,
    /// Long-press threshold in milliseconds.
    pub long_press_threshold_ms: u64,
    /// Collaborator request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            store_dir: None,
            long_press_threshold_ms: 500,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Loads settings from the platform config file.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    /// Loads settings from `path`; missing or empty file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|err| {
            PictoError::config(format!("failed to read settings at {path:?}: {err}"))
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// The store directory: the configured override, or the platform
    /// default.
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_store_dir(),
        }
    }

    pub fn long_press_threshold(&self) -> Duration {
        Duration::from_millis(self.long_press_threshold_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(settings.long_press_threshold(), Duration::from_millis(500));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "long_press_threshold_ms = 750\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.long_press_threshold(), Duration::from_millis(750));
        assert_eq!(settings.upload_url, DEFAULT_UPLOAD_URL);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search_url = [broken").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
