//! Wire DTOs for the recognition webhook.
//!
//! The collaborator answers with a JSON array of scored documents; the
//! field names below are its contract, not ours. Everything dynamically
//! shaped is validated and converted into [`PictogramDescriptor`] at this
//! single point — candidates missing their id or name are skipped here,
//! never handed downstream.

use serde::{Deserialize, Deserializer};

use pictoboard_core::error::Result;
use pictoboard_core::pictogram::PictogramDescriptor;

/// One scored candidate as the webhook sends it.
#[derive(Debug, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    /// Echo of the text the candidate was matched against.
    #[serde(default)]
    pub item_original: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    /// Arrives as a string or a bare number depending on the backing index.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, rename = "nombre del pictograma")]
    pub name: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub definicion: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unsupported id shape: {other}"
        ))),
    }
}

/// Decodes a webhook response body into descriptors, preserving order.
///
/// `fallback_text` stands in for a missing `item_original` echo (the
/// original query for text search, empty for image recognition).
/// Candidates without an id or a name are skipped with a warning; a body
/// that is not a JSON array at all is a serialization error for the caller
/// to surface.
pub fn descriptors_from_response(
    body: &str,
    fallback_text: &str,
) -> Result<Vec<PictogramDescriptor>> {
    let documents: Vec<ScoredDocument> = serde_json::from_str(body)?;

    let descriptors = documents
        .into_iter()
        .filter_map(|doc| {
            let metadata = doc.document.metadata;
            let id = metadata.id.filter(|id| !id.is_empty());
            let name = metadata.name.filter(|name| !name.is_empty());
            let (Some(id), Some(display_name)) = (id, name) else {
                tracing::warn!("skipping recognition candidate without id or name");
                return None;
            };

            Some(PictogramDescriptor {
                id,
                display_name,
                original_text: doc
                    .item_original
                    .unwrap_or_else(|| fallback_text.to_string()),
                category: metadata.categoria,
                definition: metadata.definicion,
                score: doc.score,
            })
        })
        .collect();

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape captured from a live webhook response.
    const RESPONSE: &str = r#"[
        {
            "document": {
                "metadata": {
                    "id": 2462,
                    "nombre del pictograma": "manzana",
                    "categoria": "alimentos",
                    "definicion": "Fruto del manzano"
                }
            },
            "item_original": "una manzana roja",
            "score": 0.93
        },
        {
            "document": {
                "metadata": {
                    "id": "31141",
                    "nombre del pictograma": "croissant"
                }
            },
            "score": 0.41
        },
        {
            "document": { "metadata": { "categoria": "ruido" } },
            "score": 0.1
        }
    ]"#;

    #[test]
    fn test_decodes_and_skips_invalid_candidates() {
        let descriptors = descriptors_from_response(RESPONSE, "croissant").unwrap();
        assert_eq!(descriptors.len(), 2);

        // Numeric id normalized to its string form.
        assert_eq!(descriptors[0].id, "2462");
        assert_eq!(descriptors[0].display_name, "manzana");
        assert_eq!(descriptors[0].original_text, "una manzana roja");
        assert_eq!(descriptors[0].category.as_deref(), Some("alimentos"));
        assert_eq!(descriptors[0].score, Some(0.93));

        // Missing item_original falls back to the query echo.
        assert_eq!(descriptors[1].id, "31141");
        assert_eq!(descriptors[1].original_text, "croissant");
        assert!(descriptors[1].category.is_none());
    }

    #[test]
    fn test_preserves_collaborator_order() {
        let descriptors = descriptors_from_response(RESPONSE, "").unwrap();
        let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2462", "31141"]);
    }

    #[test]
    fn test_non_array_body_is_an_error() {
        assert!(descriptors_from_response(r#"{"error":"oops"}"#, "").is_err());
        assert!(descriptors_from_response("<html>504</html>", "").is_err());
    }

    #[test]
    fn test_empty_array_is_no_candidates() {
        assert!(descriptors_from_response("[]", "").unwrap().is_empty());
    }
}
