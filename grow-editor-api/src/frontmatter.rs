//! YAML front matter in pod documents
//!
//! Pod documents come in two shapes. `.yaml`/`.yml` files are front matter
//! through and through. Other documents (`.md`, `.html`) may open with a YAML
//! block delimited by `---` lines, followed by a body:
//!
//! ```markdown
//! ---
//! $title: About
//! ---
//! # About us
//! ```
//!
//! YAML tags such as `!g.url "/content/pages/a.yaml"` have no JSON
//! equivalent. They are carried through the editor as strings of the form
//! `!tag <json>`. Parsing records every such string it produced, and only
//! those strings are turned back into tagged YAML on save. Text a user types
//! in the same shape stays a plain string.

use std::collections::BTreeSet;

use serde_json::{Number, Value};
use serde_yaml_ng::value::{Tag, TaggedValue};

use crate::error::{ApiError, Result};
use crate::types::FrontMatterMap;

/// A document split into its front matter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatterMap,
    /// Content after the front matter. `None` for pure YAML documents.
    pub body: Option<String>,
    /// `!tag <json>` strings that stand for tagged YAML values.
    pub tags: TagSet,
}

/// Strings produced from tagged YAML values while parsing.
pub type TagSet = BTreeSet<String>;

/// Whether a pod path names a pure YAML document.
pub fn is_yaml_document(pod_path: &str) -> bool {
    pod_path.ends_with(".yaml") || pod_path.ends_with(".yml")
}

/// Split a `---` delimited front matter block from the body.
///
/// Returns `(None, content)` when the content does not open with a complete
/// front matter block.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let start = if content.starts_with("---\n") {
        4
    } else if content.starts_with("---\r\n") {
        5
    } else {
        return (None, content);
    };

    let rest = &content[start..];
    match find_closing_delimiter(rest) {
        Some(end) => {
            let yaml = &rest[..end];
            let body = rest[end..]
                .strip_prefix("---")
                .unwrap_or(&rest[end..])
                .trim_start_matches('\r')
                .trim_start_matches('\n');
            (Some(yaml), body)
        }
        None => (None, content),
    }
}

/// Byte offset of a line consisting only of `---`, if any.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Parse YAML text into a front-matter mapping. Empty YAML is an empty mapping.
///
/// Tagged values found along the way are added to `tags`.
pub fn parse_yaml_front_matter(
    yaml: &str,
    pod_path: &str,
    tags: &mut TagSet,
) -> Result<FrontMatterMap> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatterMap::new());
    }
    match yaml_to_json(serde_yaml_ng::from_str::<serde_yaml_ng::Value>(yaml)?, tags) {
        Value::Null => Ok(FrontMatterMap::new()),
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidDocument {
            pod_path: pod_path.to_string(),
            message: format!("front matter must be a mapping, found {}", kind_name(&other)),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Convert a YAML value to JSON, rendering tagged values as `!tag <json>` strings.
pub fn yaml_to_json(value: serde_yaml_ng::Value, tags: &mut TagSet) -> Value {
    use serde_yaml_ng::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| yaml_to_json(item, tags))
                .collect(),
        ),
        Yaml::Mapping(mapping) => {
            let mut map = FrontMatterMap::new();
            for (key, value) in mapping {
                let key = match yaml_to_json(key, tags) {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, yaml_to_json(value, tags));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let encoded = format!("{} {}", tag, yaml_to_json(value, tags));
            tags.insert(encoded.clone());
            Value::String(encoded)
        }
    }
}

/// Convert JSON back to YAML, restoring the strings in `tags` to tagged values.
pub fn json_to_yaml(value: &Value, tags: &TagSet) -> serde_yaml_ng::Value {
    use serde_yaml_ng::Value as Yaml;
    match value {
        Value::Null => Yaml::Null,
        Value::Bool(b) => Yaml::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Yaml::Number(u.into())
            } else {
                Yaml::Number(n.as_f64().unwrap_or_default().into())
            }
        }
        Value::String(s) if tags.contains(s) => {
            parse_tagged(s, tags).unwrap_or_else(|| Yaml::String(s.clone()))
        }
        Value::String(s) => Yaml::String(s.clone()),
        Value::Array(items) => {
            Yaml::Sequence(items.iter().map(|item| json_to_yaml(item, tags)).collect())
        }
        Value::Object(map) => {
            let mut mapping = serde_yaml_ng::Mapping::new();
            for (key, value) in map {
                mapping.insert(Yaml::String(key.clone()), json_to_yaml(value, tags));
            }
            Yaml::Mapping(mapping)
        }
    }
}

/// Split a `!tag <json>` string produced by [`yaml_to_json`] back into a tagged value.
fn parse_tagged(s: &str, tags: &TagSet) -> Option<serde_yaml_ng::Value> {
    let rest = s.strip_prefix('!')?;
    let (tag, payload) = rest.split_once(' ')?;
    if tag.is_empty() || tag.contains(char::is_whitespace) {
        return None;
    }
    let payload = serde_json::from_str::<Value>(payload).ok()?;
    Some(serde_yaml_ng::Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(tag),
        value: json_to_yaml(&payload, tags),
    })))
}

/// Parse a whole document file according to its pod path.
pub fn parse_document(content: &str, pod_path: &str) -> Result<ParsedDocument> {
    let mut tags = TagSet::new();
    if is_yaml_document(pod_path) {
        return Ok(ParsedDocument {
            front_matter: parse_yaml_front_matter(content, pod_path, &mut tags)?,
            body: None,
            tags,
        });
    }

    let (yaml, body) = split_front_matter(content);
    let front_matter = match yaml {
        Some(yaml) => parse_yaml_front_matter(yaml, pod_path, &mut tags)?,
        None => FrontMatterMap::new(),
    };
    Ok(ParsedDocument {
        front_matter,
        body: Some(body.to_string()),
        tags,
    })
}

/// Render a document back to file content.
pub fn render_document(doc: &ParsedDocument) -> Result<String> {
    let yaml = if doc.front_matter.is_empty() {
        String::new()
    } else {
        serde_yaml_ng::to_string(&json_to_yaml(
            &Value::Object(doc.front_matter.clone()),
            &doc.tags,
        ))?
    };
    match &doc.body {
        None => Ok(yaml),
        Some(body) => Ok(format!("---\n{yaml}---\n{body}")),
    }
}
