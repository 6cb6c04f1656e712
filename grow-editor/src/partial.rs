//! One instance of a partial: the widgets for its fields plus its source entry.

use std::sync::Arc;

use grow_editor_api::FrontMatterMap;
use grow_editor_fields::{FieldMeta, PartialDefinitions};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{EditorError, Result};
use crate::field::{bind_fields, write_back, FieldWidget};
use crate::front_matter::{lookup, FrontMatter};

/// Key tagging each entry of a partials list with its partial.
pub const PARTIAL_KEY: &str = "partial";

#[derive(Debug, Clone, PartialEq)]
pub struct PartialContainer {
    key: String,
    label: String,
    source: FrontMatter,
    fields: Vec<FieldWidget>,
}

impl PartialContainer {
    /// Build a widget per metadata entry, seeded from `front_matter` by dotted key.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        front_matter: &Value,
        field_meta: &[FieldMeta],
        definitions: &Arc<PartialDefinitions>,
    ) -> Result<Self> {
        let source = FrontMatter::from_value(front_matter.clone());
        let fields = bind_fields(field_meta, &source, definitions)?;

        Ok(Self {
            key: key.into(),
            label: label.into(),
            source,
            fields,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn display_label(&self) -> String {
        format!("Partial: {}", self.label)
    }

    pub fn fields(&self) -> &[FieldWidget] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldWidget> {
        self.fields.iter().find(|f| f.key() == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldWidget> {
        self.fields.iter_mut().find(|f| f.key() == key)
    }

    /// Flat value: the partial key plus each widget's value under its dotted key.
    pub fn value(&self) -> FrontMatterMap {
        let mut map = Map::new();
        map.insert(PARTIAL_KEY.to_string(), Value::String(self.key.clone()));
        for field in &self.fields {
            map.insert(field.key().to_string(), field.value());
        }
        map
    }

    /// The source entry with every widget value written back at its dotted key.
    ///
    /// Empty widgets whose key was absent from the source stay absent.
    pub fn merged_value(&self) -> Value {
        let mut source = self.source.clone();
        if let Err(e) = source.set(PARTIAL_KEY, Value::String(self.key.clone())) {
            warn!(partial = %self.key, %e, "could not tag partial entry");
        }
        match write_back(&source, &self.fields) {
            Ok(merged) => Value::Object(merged.into_map()),
            Err(e) => {
                warn!(partial = %self.key, %e, "keeping source entry");
                Value::Object(source.into_map())
            }
        }
    }

    /// Push a value object into the widgets.
    ///
    /// Each widget takes the flat entry under its key if present, else the
    /// dotted lookup into `value`. Widgets with neither keep their value.
    pub fn update(&mut self, value: &Value) -> Result<()> {
        let Value::Object(map) = value else {
            return Err(EditorError::InvalidValue {
                key: self.key.clone(),
                message: "partial value must be a mapping".to_string(),
            });
        };
        if let Some(found) = map.get(PARTIAL_KEY).and_then(Value::as_str) {
            if found != self.key {
                return Err(EditorError::PartialMismatch {
                    expected: self.key.clone(),
                    found: found.to_string(),
                });
            }
        }

        for field in &mut self.fields {
            let next = map
                .get(field.key())
                .or_else(|| lookup(value, field.key()))
                .cloned();
            if let Some(next) = next {
                field.set_value(next)?;
            }
        }
        Ok(())
    }
}
