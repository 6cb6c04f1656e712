//! Editable widgets bound to front-matter keys.

use std::borrow::Cow;
use std::sync::Arc;

use grow_editor_fields::{FieldMeta, FieldType, PartialDefinitions};
use serde_json::Value;
use tracing::warn;

use crate::error::{EditorError, Result};
use crate::front_matter::FrontMatter;
use crate::partial::{PartialContainer, PARTIAL_KEY};

/// Single-value text input. Also stands in for unrecognized field types.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    key: String,
    label: String,
    type_: FieldType,
    /// A string, number or boolean, kept in the type it was set with.
    value: Option<Value>,
}

impl TextField {
    pub fn new(key: impl Into<String>, type_: FieldType) -> Self {
        Self {
            key: key.into(),
            label: String::new(),
            type_,
            value: None,
        }
    }

    /// The value as display text.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self.value.as_ref()? {
            Value::String(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.type_ == FieldType::Textarea
    }

    /// Scalars are kept in their own type and null clears. Lists and
    /// mappings are rejected.
    fn set_value(&mut self, value: Value) -> Result<()> {
        self.value = match value {
            Value::Null => None,
            scalar @ (Value::String(_) | Value::Bool(_) | Value::Number(_)) => Some(scalar),
            Value::Array(_) | Value::Object(_) => {
                return Err(EditorError::InvalidValue {
                    key: self.key.clone(),
                    message: format!("{} field cannot hold a list or mapping", self.type_),
                })
            }
        };
        Ok(())
    }

    fn value(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }
}

/// One entry of a partials list.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialItem {
    /// An instance of a known partial
    Container(PartialContainer),
    /// An entry with no known partial, carried through unchanged
    Verbatim(Value),
}

impl PartialItem {
    pub fn value(&self) -> Value {
        match self {
            Self::Container(container) => container.merged_value(),
            Self::Verbatim(value) => value.clone(),
        }
    }
}

/// Ordered list of partial instances.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialsField {
    key: String,
    label: String,
    items: Vec<PartialItem>,
    definitions: Arc<PartialDefinitions>,
}

impl PartialsField {
    pub fn new(key: impl Into<String>, definitions: Arc<PartialDefinitions>) -> Self {
        Self {
            key: key.into(),
            label: String::new(),
            items: Vec::new(),
            definitions,
        }
    }

    pub fn items(&self) -> &[PartialItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [PartialItem] {
        &mut self.items
    }

    /// Append an empty instance of a partial, returning its index.
    pub fn push(&mut self, partial: &str) -> Result<usize> {
        let def = self
            .definitions
            .get(partial)
            .ok_or_else(|| EditorError::UnknownPartial {
                key: partial.to_string(),
            })?;
        let mut entry = serde_json::Map::new();
        entry.insert(PARTIAL_KEY.into(), Value::String(partial.to_string()));
        let container = PartialContainer::new(
            partial,
            def.label.clone(),
            &Value::Object(entry),
            &def.fields,
            &self.definitions,
        )?;
        self.items.push(PartialItem::Container(container));
        Ok(self.items.len() - 1)
    }

    pub fn container_mut(&mut self, index: usize) -> Option<&mut PartialContainer> {
        match self.items.get_mut(index)? {
            PartialItem::Container(container) => Some(container),
            PartialItem::Verbatim(_) => None,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<PartialItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn build_item(&self, index: usize, value: Value) -> Result<PartialItem> {
        let partial = value.get(PARTIAL_KEY).and_then(Value::as_str);
        match partial.and_then(|key| self.definitions.get(key).map(|def| (key, def))) {
            Some((key, def)) => Ok(PartialItem::Container(PartialContainer::new(
                key,
                def.label.clone(),
                &value,
                &def.fields,
                &self.definitions,
            )?)),
            None => {
                warn!(
                    field = %self.key,
                    index,
                    partial = partial.unwrap_or("<none>"),
                    "no definition for partial, keeping entry as-is"
                );
                Ok(PartialItem::Verbatim(value))
            }
        }
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        let entries = match value {
            Value::Null => Vec::new(),
            Value::Array(entries) => entries,
            _ => {
                return Err(EditorError::InvalidValue {
                    key: self.key.clone(),
                    message: "partials field expects a list".to_string(),
                })
            }
        };
        self.items = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.build_item(index, entry))
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn value(&self) -> Value {
        Value::Array(self.items.iter().map(PartialItem::value).collect())
    }
}

/// A widget produced from field metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Text(TextField),
    Partials(PartialsField),
}

impl FieldWidget {
    pub fn key(&self) -> &str {
        match self {
            Self::Text(f) => &f.key,
            Self::Partials(f) => &f.key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Text(f) => &f.label,
            Self::Partials(f) => &f.label,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self {
            Self::Text(f) => f.label = label,
            Self::Partials(f) => f.label = label,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(f) => f.type_.clone(),
            Self::Partials(_) => FieldType::Partials,
        }
    }

    /// True for a text widget with no value or a partials list with no items.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(f) => f.value.is_none(),
            Self::Partials(f) => f.items.is_empty(),
        }
    }

    /// Current value in front-matter form; an empty text widget is null.
    pub fn value(&self) -> Value {
        match self {
            Self::Text(f) => f.value(),
            Self::Partials(f) => f.value(),
        }
    }

    pub fn set_value(&mut self, value: Value) -> Result<()> {
        match self {
            Self::Text(f) => f.set_value(value),
            Self::Partials(f) => f.set_value(value),
        }
    }
}

/// Build the widget for a piece of field metadata, labelled but empty.
///
/// Unknown types fall back to a text widget so the form still opens.
pub fn field_generator(meta: &FieldMeta, definitions: &Arc<PartialDefinitions>) -> FieldWidget {
    let mut widget = match &meta.type_ {
        FieldType::Text | FieldType::Textarea => {
            FieldWidget::Text(TextField::new(&meta.key, meta.type_.clone()))
        }
        FieldType::Partials => {
            FieldWidget::Partials(PartialsField::new(&meta.key, Arc::clone(definitions)))
        }
        FieldType::Unknown(name) => {
            warn!(key = %meta.key, field_type = %name, "unknown field type, using text");
            FieldWidget::Text(TextField::new(&meta.key, meta.type_.clone()))
        }
    };
    widget.set_label(meta.label.clone());
    widget
}

/// Build a widget per metadata entry, seeded from `source` by dotted key.
///
/// A key whose path runs through a scalar starts empty.
pub(crate) fn bind_fields(
    field_meta: &[FieldMeta],
    source: &FrontMatter,
    definitions: &Arc<PartialDefinitions>,
) -> Result<Vec<FieldWidget>> {
    let mut fields = Vec::with_capacity(field_meta.len());
    for meta in field_meta {
        let mut widget = field_generator(meta, definitions);
        if let Some(value) = source.get(&meta.key) {
            widget.set_value(value.clone())?;
        }
        fields.push(widget);
    }
    Ok(fields)
}

/// `source` with every widget value written back at its dotted key.
///
/// Empty widgets whose key is absent from `source` stay absent.
pub(crate) fn write_back(source: &FrontMatter, fields: &[FieldWidget]) -> Result<FrontMatter> {
    let mut merged = source.clone();
    for field in fields {
        if field.is_empty() && !source.contains(field.key()) {
            continue;
        }
        merged.set(field.key(), field.value())?;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grow_editor_fields::PartialDef;
    use serde_json::json;

    fn definitions() -> Arc<PartialDefinitions> {
        let mut defs = PartialDefinitions::new();
        defs.insert(
            "hero".to_string(),
            PartialDef::new("Hero")
                .field(FieldMeta::text("title", "Hero Title"))
                .field(FieldMeta::textarea("description", "Description")),
        );
        Arc::new(defs)
    }

    #[test]
    fn generator_dispatches_on_type() {
        let defs = definitions();
        let text = field_generator(&FieldMeta::text("$title", "Title"), &defs);
        assert!(matches!(text, FieldWidget::Text(_)));
        assert_eq!(text.label(), "Title");

        let area = field_generator(&FieldMeta::textarea("meta.description", "Desc"), &defs);
        match &area {
            FieldWidget::Text(f) => assert!(f.is_multiline()),
            other => panic!("expected text widget, got {other:?}"),
        }

        let partials = field_generator(&FieldMeta::partials("partials", "Partials"), &defs);
        assert_eq!(partials.field_type(), FieldType::Partials);
    }

    #[test]
    fn unknown_type_falls_back_to_text() {
        let meta = FieldMeta::new(FieldType::from("color"), "theme", "Theme");
        let mut widget = field_generator(&meta, &definitions());
        assert_eq!(widget.field_type(), FieldType::Unknown("color".into()));
        widget.set_value(json!("#fff")).unwrap();
        assert_eq!(widget.value(), json!("#fff"));
    }

    #[test]
    fn text_keeps_scalar_types() {
        let mut widget = field_generator(&FieldMeta::text("n", "N"), &definitions());
        widget.set_value(json!(42)).unwrap();
        assert_eq!(widget.value(), json!(42));
        let FieldWidget::Text(field) = &widget else {
            panic!("expected text widget");
        };
        assert_eq!(field.text().as_deref(), Some("42"));

        widget.set_value(json!(true)).unwrap();
        assert_eq!(widget.value(), json!(true));
        widget.set_value(json!("42")).unwrap();
        assert_eq!(widget.value(), json!("42"));
        widget.set_value(Value::Null).unwrap();
        assert_eq!(widget.value(), Value::Null);
        assert!(widget.is_empty());
    }

    #[test]
    fn bind_leaves_key_through_scalar_empty() {
        let source = FrontMatter::from_value(json!({"meta": "legacy", "$title": "A"}));
        let fields = bind_fields(
            &[
                FieldMeta::textarea("meta.description", "Description"),
                FieldMeta::text("$title", "Title"),
            ],
            &source,
            &definitions(),
        )
        .unwrap();
        assert!(fields[0].is_empty());
        assert_eq!(fields[1].value(), json!("A"));

        // Untouched, the conflicting key is skipped on write-back.
        assert_eq!(write_back(&source, &fields).unwrap(), source);
    }

    #[test]
    fn text_rejects_structures() {
        let mut widget = field_generator(&FieldMeta::text("n", "N"), &definitions());
        let err = widget.set_value(json!({"a": 1})).unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { key, .. } if key == "n"));
        assert!(widget.set_value(json!([1])).is_err());
    }

    #[test]
    fn partials_build_containers_and_keep_unknown_entries() {
        let mut widget = field_generator(&FieldMeta::partials("partials", "Partials"), &definitions());
        let value = json!([
            {"partial": "hero", "title": "Blinkk", "cta": {"url": "!g.url \"/x.yaml\""}},
            {"partial": "carousel", "slides": [1, 2]},
        ]);
        widget.set_value(value.clone()).unwrap();

        let FieldWidget::Partials(field) = &widget else {
            panic!("expected partials widget");
        };
        assert_eq!(field.items().len(), 2);
        assert!(matches!(&field.items()[0], PartialItem::Container(c) if c.key() == "hero"));
        assert!(matches!(&field.items()[1], PartialItem::Verbatim(_)));

        // Keys without widgets survive the round trip.
        assert_eq!(widget.value(), value);
    }

    #[test]
    fn partials_reject_non_list() {
        let mut widget = field_generator(&FieldMeta::partials("partials", "Partials"), &definitions());
        assert!(matches!(
            widget.set_value(json!("hero")),
            Err(EditorError::InvalidValue { .. })
        ));
    }

    #[test]
    fn partials_push_and_remove() {
        let mut field = PartialsField::new("partials", definitions());
        let index = field.push("hero").unwrap();
        field
            .container_mut(index)
            .unwrap()
            .update(&json!({"title": "New"}))
            .unwrap();
        assert_eq!(field.value(), json!([{"partial": "hero", "title": "New"}]));

        assert!(matches!(
            field.push("missing"),
            Err(EditorError::UnknownPartial { .. })
        ));
        assert!(field.remove(0).is_some());
        assert!(field.remove(0).is_none());
    }
}
