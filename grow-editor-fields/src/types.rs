//! Field metadata and partial definition types.
//!
//! All types serialize to/from JSON and YAML via serde. A field metadata entry
//! names one editable value in a front-matter tree by dotted key. A partial
//! definition is a labelled, ordered list of field metadata that can be
//! instantiated many times inside a document.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The widget kind of a field, carried on the wire as a plain string.
///
/// Unrecognized kinds are preserved verbatim so that a newer server does not
/// break an older editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Multi-line text
    Textarea,
    /// Ordered list of partial instances
    Partials,
    /// Any kind this crate does not know about
    Unknown(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Partials => "partials",
            FieldType::Unknown(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => FieldType::Text,
            "textarea" => FieldType::Textarea,
            "partials" => FieldType::Partials,
            _ => FieldType::Unknown(value),
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        FieldType::from(value.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Unknown(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field metadata entry: which widget to build and where its value lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldMeta {
    #[serde(rename = "type")]
    pub type_: FieldType,
    /// Dotted path into the front matter, e.g. `meta.description`.
    pub key: String,
    #[serde(default)]
    pub label: String,
}

impl FieldMeta {
    pub fn new(type_: impl Into<FieldType>, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            key: key.into(),
            label: label.into(),
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(FieldType::Text, key, label)
    }

    pub fn textarea(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(FieldType::Textarea, key, label)
    }

    pub fn partials(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(FieldType::Partials, key, label)
    }
}

/// A partial definition: the fields shared by every instance of one partial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PartialDef {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
}

impl PartialDef {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field to the definition.
    pub fn field(mut self, meta: FieldMeta) -> Self {
        self.fields.push(meta);
        self
    }
}

/// All partials known to a pod, keyed by partial key, in declaration order.
pub type PartialDefinitions = IndexMap<String, PartialDef>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_parses_known_kinds() {
        assert_eq!(FieldType::from("text"), FieldType::Text);
        assert_eq!(FieldType::from("textarea"), FieldType::Textarea);
        assert_eq!(FieldType::from("partials"), FieldType::Partials);
    }

    #[test]
    fn field_type_preserves_unknown_kind() {
        let ft = FieldType::from("markdown");
        assert_eq!(ft, FieldType::Unknown("markdown".into()));
        assert_eq!(ft.as_str(), "markdown");
        assert_eq!(String::from(ft), "markdown");
    }

    #[test]
    fn field_meta_json_uses_type_key() {
        let meta: FieldMeta = serde_json::from_value(serde_json::json!({
            "type": "textarea",
            "key": "meta.description",
            "label": "Description",
        }))
        .unwrap();
        assert_eq!(meta, FieldMeta::textarea("meta.description", "Description"));

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["type"], "textarea");
    }

    #[test]
    fn field_meta_label_defaults_to_empty() {
        let meta: FieldMeta =
            serde_json::from_value(serde_json::json!({"type": "text", "key": "title"})).unwrap();
        assert_eq!(meta.label, "");
    }

    #[test]
    fn partial_def_yaml() {
        let yaml = "label: Hero\nfields:\n  - type: text\n    key: title\n    label: Hero Title\n";
        let def: PartialDef = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(def.label, "Hero");
        assert_eq!(def.fields, vec![FieldMeta::text("title", "Hero Title")]);
    }

    #[test]
    fn partial_definitions_keep_declaration_order() {
        let defs: PartialDefinitions = serde_json::from_str(
            r#"{"zeta": {"label": "Z"}, "alpha": {"label": "A"}, "hero": {"label": "Hero"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = defs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "hero"]);
    }
}
