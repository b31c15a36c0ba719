//! Ephemeral drag-transfer protocol.
//!
//! A transfer session serializes a single [`PictogramDescriptor`] (never a
//! menu entry: the menu id is minted on drop) into a media-type-tagged JSON
//! payload, and tracks the transient flags the views need for visual
//! feedback. A malformed payload decodes to `None` and is discarded
//! silently; the drop never mutates anything in that case.

use serde::Deserialize;

use crate::error::Result;
use crate::pictogram::PictogramDescriptor;

/// Media-type tag carried alongside every transfer payload.
pub const TRANSFER_MEDIA_TYPE: &str = "application/x-pictogram+json";

/// Permissive mirror of the descriptor used only to validate incoming
/// payloads: required fields arrive as options so a missing field is a
/// decode-level discard, not a panic downstream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransferDescriptor {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    original_text: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// A serialized descriptor in flight between a result list and the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload {
    /// Always [`TRANSFER_MEDIA_TYPE`]; carried explicitly so drop targets
    /// can reject foreign payloads.
    pub media_type: &'static str,
    /// JSON encoding of the descriptor.
    pub data: String,
}

impl TransferPayload {
    /// Serializes `descriptor` for transfer.
    pub fn encode(descriptor: &PictogramDescriptor) -> Result<Self> {
        Ok(Self {
            media_type: TRANSFER_MEDIA_TYPE,
            data: serde_json::to_string(descriptor)?,
        })
    }

    /// Parses a payload received by a drop target.
    ///
    /// Returns `None` — logged, never surfaced to the user — when the media
    /// type is foreign, the JSON is unparseable, or the required `id` /
    /// `displayName` fields are missing or empty.
    pub fn decode(media_type: &str, data: &str) -> Option<PictogramDescriptor> {
        if media_type != TRANSFER_MEDIA_TYPE {
            tracing::warn!("discarding drop with foreign media type '{media_type}'");
            return None;
        }

        let raw: RawTransferDescriptor = match serde_json::from_str(data) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("discarding malformed transfer payload: {err}");
                return None;
            }
        };

        let id = raw.id.filter(|id| !id.is_empty());
        let display_name = raw.display_name.filter(|name| !name.is_empty());
        let (Some(id), Some(display_name)) = (id, display_name) else {
            tracing::warn!("discarding transfer payload missing id or display name");
            return None;
        };

        Some(PictogramDescriptor {
            id,
            display_name,
            original_text: raw.original_text.unwrap_or_default(),
            category: raw.category,
            definition: raw.definition,
            score: raw.score,
        })
    }
}

/// Session-scoped drag state, visual feedback only.
///
/// Transfers are strictly sequential: beginning a new one implicitly
/// cancels any dangling prior state.
#[derive(Debug, Default)]
pub struct DragTransfer {
    dragging: bool,
    over_target: bool,
}

impl DragTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transfer session is active (source item picked up).
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the drop target should render its hover-feedback style.
    pub fn is_over_target(&self) -> bool {
        self.over_target
    }

    /// Starts a transfer session for `descriptor`, returning the payload
    /// the source hands to the platform drag machinery.
    pub fn begin(&mut self, descriptor: &PictogramDescriptor) -> Result<TransferPayload> {
        if self.dragging {
            tracing::debug!("new drag started while one was active; prior session cancelled");
        }
        self.over_target = false;
        self.dragging = true;
        TransferPayload::encode(descriptor)
    }

    /// The pointer entered the drop target while a transfer is active.
    pub fn drag_over(&mut self) {
        if self.dragging {
            self.over_target = true;
        }
    }

    /// The pointer left the drop target.
    pub fn drag_leave(&mut self) {
        self.over_target = false;
    }

    /// Ends the session without a drop (explicit cancellation, or drop
    /// outside any valid target).
    pub fn cancel(&mut self) {
        self.dragging = false;
        self.over_target = false;
    }

    /// Ends the session after the drop target consumed (or discarded) the
    /// payload.
    pub fn complete(&mut self) {
        self.dragging = false;
        self.over_target = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PictogramDescriptor {
        let mut d = PictogramDescriptor::new("42", "apple", "manzana");
        d.score = Some(0.91);
        d
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let payload = TransferPayload::encode(&descriptor()).unwrap();
        assert_eq!(payload.media_type, TRANSFER_MEDIA_TYPE);
        let back = TransferPayload::decode(payload.media_type, &payload.data).unwrap();
        assert_eq!(back, descriptor());
    }

    #[test]
    fn test_payload_never_carries_menu_id() {
        let payload = TransferPayload::encode(&descriptor()).unwrap();
        assert!(!payload.data.contains("menuId"));
    }

    #[test]
    fn test_foreign_media_type_is_discarded() {
        let payload = TransferPayload::encode(&descriptor()).unwrap();
        assert!(TransferPayload::decode("text/plain", &payload.data).is_none());
    }

    #[test]
    fn test_unparseable_payload_is_discarded() {
        assert!(TransferPayload::decode(TRANSFER_MEDIA_TYPE, "{{nope").is_none());
    }

    #[test]
    fn test_missing_required_fields_are_discarded() {
        assert!(
            TransferPayload::decode(TRANSFER_MEDIA_TYPE, r#"{"displayName":"apple"}"#).is_none()
        );
        assert!(TransferPayload::decode(TRANSFER_MEDIA_TYPE, r#"{"id":"42"}"#).is_none());
        assert!(
            TransferPayload::decode(TRANSFER_MEDIA_TYPE, r#"{"id":"","displayName":"apple"}"#)
                .is_none()
        );
    }

    #[test]
    fn test_drag_session_flags() {
        let mut drag = DragTransfer::new();
        assert!(!drag.is_dragging());

        drag.begin(&descriptor()).unwrap();
        assert!(drag.is_dragging());
        assert!(!drag.is_over_target());

        drag.drag_over();
        assert!(drag.is_over_target());
        drag.drag_leave();
        assert!(!drag.is_over_target());

        drag.complete();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_new_drag_supersedes_dangling_one() {
        let mut drag = DragTransfer::new();
        drag.begin(&descriptor()).unwrap();
        drag.drag_over();

        // Never completed; starting again resets the hover state.
        drag.begin(&descriptor()).unwrap();
        assert!(drag.is_dragging());
        assert!(!drag.is_over_target());
    }

    #[test]
    fn test_hover_ignored_without_active_transfer() {
        let mut drag = DragTransfer::new();
        drag.drag_over();
        assert!(!drag.is_over_target());
    }
}
