//! Error types for the pictoboard session core.

use thiserror::Error;

/// A shared error type for the entire pictoboard workspace.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Nothing in the session
/// core treats these as fatal: callers degrade to a safe default state.
#[derive(Error, Debug, Clone)]
pub enum PictoError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Storage access error (key/value store layer)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recognition collaborator error (network failure, non-success
    /// status, unparseable response)
    #[error("Recognition error: {0}")]
    Collaborator(String),
}

impl PictoError {
    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }
}

impl From<std::io::Error> for PictoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PictoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PictoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PictoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PictoError>`.
pub type Result<T> = std::result::Result<T, PictoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: PictoError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, PictoError::Io { .. }));
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_carries_format() {
        let bad = serde_json::from_str::<Vec<u32>>("{torn").unwrap_err();
        let err: PictoError = bad.into();
        match err {
            PictoError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("expected serialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_constructor_helpers_display() {
        assert_eq!(
            PictoError::collaborator("connection refused").to_string(),
            "Recognition error: connection refused"
        );
        assert_eq!(
            PictoError::config("missing url").to_string(),
            "Configuration error: missing url"
        );
        assert_eq!(
            PictoError::storage("lock poisoned").to_string(),
            "Storage error: lock poisoned"
        );
    }
}
