//! File-backed key/value store.
//!
//! One JSON text file per key under a data directory, with atomic
//! replacement: writes go to a temporary sibling, are fsynced, and renamed
//! into place. Missing and empty files both read as absent. There is no
//! locking; a single logical writer is assumed and the last writer wins.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use pictoboard_core::error::Result;
use pictoboard_core::storage::KeyValueStore;

/// Durable store writing each key to `<root>/<sanitized-key>.json`.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; anything else is flattened so a key
        // can never escape the store directory.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{sanitized}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(value.as_bytes())?;
            tmp.sync_all()?;
        }

        match fs::rename(&tmp_path, &path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                // Windows refuses to rename over an existing file.
                if path.exists() {
                    fs::remove_file(&path)?;
                    fs::rename(&tmp_path, &path)?;
                    Ok(())
                } else {
                    Err(rename_err.into())
                }
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
