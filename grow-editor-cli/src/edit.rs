//! `grow-editor edit` - set field values and save.

use std::sync::Arc;

use grow_editor::DocumentEditor;
use grow_editor_api::EditorApi;
use serde_json::Value;
use tracing::info;

use crate::error::CliError;

/// Split `key=value`, parsing the value as YAML. An empty value clears the field.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAssignment(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidAssignment(raw.to_string()));
    }
    let value = if value.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml_ng::from_str(value).map_err(|source| CliError::InvalidValue {
            key: key.to_string(),
            source,
        })?
    };
    Ok((key.to_string(), value))
}

/// Run the edit command, printing the saved document as YAML.
pub async fn run_edit(
    api: Arc<dyn EditorApi>,
    pod_path: &str,
    assignments: &[String],
    locale: Option<&str>,
) -> Result<(), CliError> {
    let assignments = assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut editor = DocumentEditor::load(api, pod_path).await?;
    for (key, value) in assignments {
        editor.set(&key, value)?;
    }
    if !editor.is_dirty() && locale.is_none() {
        info!(pod_path, "no changes to save");
        println!("No changes.");
        return Ok(());
    }

    let saved = editor.save(locale).await?;
    print!("{}", serde_yaml_ng::to_string(&saved)?);
    Ok(())
}
