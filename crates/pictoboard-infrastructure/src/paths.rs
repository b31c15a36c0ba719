//! Platform path resolution for pictoboard files.
//!
//! ```text
//! <config_dir>/pictoboard/config.toml   # settings
//! <data_dir>/pictoboard/store/          # key/value store files
//! ```

use std::path::PathBuf;

use pictoboard_core::error::{PictoError, Result};

const APP_DIR: &str = "pictoboard";

/// Returns the settings file path, e.g. `~/.config/pictoboard/config.toml`.
pub fn config_file() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| PictoError::config("cannot determine the platform config directory"))?;
    Ok(config_dir.join(APP_DIR).join("config.toml"))
}

/// Returns the default store directory, e.g.
/// `~/.local/share/pictoboard/store`.
pub fn default_store_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| PictoError::config("cannot determine the platform data directory"))?;
    Ok(data_dir.join(APP_DIR).join("store"))
}
