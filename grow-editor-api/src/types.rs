//! Request and response types for the editor API.

use grow_editor_fields::{FieldMeta, PartialDefinitions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A front-matter tree. The root is always a mapping.
pub type FrontMatterMap = Map<String, Value>;

/// Response of `get_document`: a document with the fields the editor exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub pod_path: String,
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
    #[serde(default)]
    pub front_matter: FrontMatterMap,
    /// Locale to serving path.
    #[serde(default)]
    pub serving_paths: IndexMap<String, String>,
    #[serde(default)]
    pub default_locale: String,
}

/// Response of `get_partials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PartialsResponse {
    #[serde(default)]
    pub partials: PartialDefinitions,
}

/// Body of a save request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRequest {
    pub pod_path: String,
    pub front_matter: FrontMatterMap,
    pub locale: String,
}

/// Response of `save_document`: the document as stored, without field metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedDocument {
    pub pod_path: String,
    #[serde(default)]
    pub front_matter: FrontMatterMap,
    #[serde(default)]
    pub serving_paths: IndexMap<String, String>,
    #[serde(default)]
    pub default_locale: String,
}

impl From<Document> for SavedDocument {
    fn from(doc: Document) -> Self {
        Self {
            pod_path: doc.pod_path,
            front_matter: doc.front_matter,
            serving_paths: doc.serving_paths,
            default_locale: doc.default_locale,
        }
    }
}

/// Unwrap an object value, treating anything else as an empty mapping.
pub(crate) fn into_map(value: Value) -> FrontMatterMap {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_decodes_with_missing_optional_parts() {
        let doc: Document = serde_json::from_value(json!({
            "pod_path": "/content/pages/about.yaml",
        }))
        .unwrap();
        assert!(doc.fields.is_empty());
        assert!(doc.front_matter.is_empty());
        assert!(doc.serving_paths.is_empty());
    }

    #[test]
    fn document_rejects_scalar_front_matter() {
        let result = serde_json::from_value::<Document>(json!({
            "pod_path": "/content/pages/about.yaml",
            "front_matter": "nope",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn saved_document_drops_fields() {
        let doc: Document = serde_json::from_value(json!({
            "pod_path": "/a.yaml",
            "fields": [{"type": "text", "key": "$title", "label": "Title"}],
            "front_matter": {"$title": "A"},
            "serving_paths": {"en": "/a/"},
            "default_locale": "en",
        }))
        .unwrap();
        let saved = SavedDocument::from(doc);
        let value = serde_json::to_value(&saved).unwrap();
        assert!(value.get("fields").is_none());
        assert_eq!(value["front_matter"]["$title"], "A");
    }
}
