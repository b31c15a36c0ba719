//! Pictogram descriptor value object.

use serde::{Deserialize, Serialize};

/// An illustrated vocabulary entry, produced by the external recognition
/// collaborator or reconstructed from storage.
///
/// Descriptors are immutable value objects once produced by the
/// collaborator. The user-facing caption lives in `original_text`; when a
/// descriptor becomes a menu entry that copy of the caption is the only
/// field that may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictogramDescriptor {
    /// Opaque identifier, stable across sessions.
    pub id: String,

    /// Display name of the pictogram.
    pub display_name: String,

    /// The user's free-text query or edited caption.
    #[serde(default)]
    pub original_text: String,

    /// Category label, when the collaborator provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Dictionary-style definition, when the collaborator provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Collaborator confidence in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl PictogramDescriptor {
    /// Creates a descriptor with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            original_text: original_text.into(),
            category: None,
            definition: None,
            score: None,
        }
    }

    /// Key used for menu deduplication.
    ///
    /// Two descriptors with the same `(id, original_text)` pair denote the
    /// same menu item, regardless of score or metadata differences.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.id, &self.original_text)
    }
}
