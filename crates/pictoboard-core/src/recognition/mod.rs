//! Recognition collaborator boundary.
//!
//! The network search/upload collaborator is external: the core consumes
//! its ordered candidate lists through this trait and treats them strictly
//! as read-only result sets. The concrete webhook client lives in the
//! infrastructure crate.

use async_trait::async_trait;

use crate::error::Result;
use crate::pictogram::PictogramDescriptor;

/// Maps an image payload or a free-text query to candidate pictograms.
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    /// Searches pictograms for a free-text query.
    async fn search_text(&self, query: &str) -> Result<Vec<PictogramDescriptor>>;

    /// Recognizes pictogram candidates in an uploaded image.
    async fn recognize_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<Vec<PictogramDescriptor>>;
}

/// User-visible lifecycle of one collaborator request.
///
/// In-memory only: a restored session always starts at [`Idle`]
/// (see `ResultPane::restore` in the application crate), so the status
/// is never written to the store. A failure is surfaced as a status
/// message, never as a crash.
///
/// [`Idle`]: QueryStatus::Idle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// No request issued yet.
    #[default]
    Idle,
    /// A request is in flight.
    InProgress,
    /// The last request completed with results.
    Succeeded,
    /// The last request failed; carries the user-facing message.
    Failed(String),
}

impl QueryStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, QueryStatus::InProgress)
    }
}
