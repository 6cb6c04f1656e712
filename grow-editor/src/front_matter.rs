//! Dotted-path access into a front-matter tree.
//!
//! A path is a `.`-separated list of segments. Segments descend into mappings
//! by key and into lists by decimal index, so `partials.0.title` names the
//! title of the first partial. Keys that contain no dot, such as `$title`, are
//! plain lookups.

use grow_editor_api::FrontMatterMap;
use serde_json::{Map, Value};

use crate::error::{EditorError, Result};

/// Look up a dotted path in any value.
///
/// Returns `None` for an empty path, an empty segment, a missing key, an
/// out-of-range or non-numeric list index, or a scalar in the middle of the
/// path.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = value;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn segments(path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if path.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(EditorError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

fn set_in(current: &mut Value, parts: &[&str], value: Value, path: &str) -> Result<()> {
    let conflict = || EditorError::PathConflict {
        path: path.to_string(),
    };
    let Some((head, rest)) = parts.split_first() else {
        *current = value;
        return Ok(());
    };

    match current {
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(head.to_string(), value);
                return Ok(());
            }
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            // An empty YAML key (`meta:`) loads as null; treat it as a fresh mapping.
            if child.is_null() {
                *child = Value::Object(Map::new());
            }
            set_in(child, rest, value, path)
        }
        Value::Array(items) => {
            let index: usize = head.parse().map_err(|_| conflict())?;
            if index > items.len() {
                return Err(conflict());
            }
            if index == items.len() {
                items.push(if rest.is_empty() {
                    Value::Null
                } else {
                    Value::Object(Map::new())
                });
            }
            set_in(&mut items[index], rest, value, path)
        }
        _ => Err(conflict()),
    }
}

/// A front-matter tree whose root is always a mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    root: Value,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::from_map(FrontMatterMap::new())
    }

    pub fn from_map(map: FrontMatterMap) -> Self {
        Self {
            root: Value::Object(map),
        }
    }

    /// Wrap a value; anything but a mapping becomes an empty tree.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Set a value, creating intermediate mappings as needed.
    ///
    /// List segments must index an existing element or the position just past
    /// the end, which appends.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let parts = segments(path)?;
        if !self.root.is_object() {
            self.root = Value::Object(Map::new());
        }
        set_in(&mut self.root, &parts, value, path)
    }

    /// Remove a value, returning it if it was present.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let parts = segments(path).ok()?;
        let (last, parents) = parts.split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = match current {
                Value::Object(map) => map.get_mut(*segment)?,
                Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match current {
            Value::Object(map) => map.remove(*last),
            Value::Array(items) => {
                let index = last.parse::<usize>().ok()?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn to_map(&self) -> FrontMatterMap {
        match &self.root {
            Value::Object(map) => map.clone(),
            _ => FrontMatterMap::new(),
        }
    }

    pub fn into_map(self) -> FrontMatterMap {
        match self.root {
            Value::Object(map) => map,
            _ => FrontMatterMap::new(),
        }
    }
}

impl From<FrontMatterMap> for FrontMatter {
    fn from(map: FrontMatterMap) -> Self {
        Self::from_map(map)
    }
}
