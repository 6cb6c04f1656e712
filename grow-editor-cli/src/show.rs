//! `grow-editor show` - print a document's fields and values.

use std::sync::Arc;

use grow_editor::{DocumentEditor, FieldWidget, PartialItem};
use grow_editor_api::EditorApi;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::table::{display_value, new_table, truncate_str};

const VALUE_WIDTH: usize = 60;

/// Run the show command.
pub async fn run_show(
    api: Arc<dyn EditorApi>,
    pod_path: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let editor = DocumentEditor::load(api, pod_path).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document_json(&editor)?)?)
        }
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&document_json(&editor)?)?),
        OutputFormat::Table => {
            println!("{}", editor.pod_path());
            for (locale, path) in editor.serving_paths() {
                let marker = if locale == editor.default_locale() { " (default)" } else { "" };
                println!("  {locale}{marker}: {path}");
            }
            let mut table = new_table();
            table.set_header(vec!["Key", "Type", "Label", "Value"]);
            for row in field_rows(&editor) {
                table.add_row(row);
            }
            println!("{table}");
        }
    }
    Ok(())
}

fn document_json(editor: &DocumentEditor) -> Result<serde_json::Value, CliError> {
    Ok(json!({
        "pod_path": editor.pod_path(),
        "fields": editor.document().fields,
        "front_matter": editor.front_matter()?.into_map(),
        "serving_paths": editor.serving_paths(),
        "default_locale": editor.default_locale(),
    }))
}

/// Table rows for every widget, with partial instances expanded beneath their list.
pub fn field_rows(editor: &DocumentEditor) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for widget in editor.fields() {
        push_widget(&mut rows, "", widget);
    }
    rows
}

fn push_widget(rows: &mut Vec<Vec<String>>, prefix: &str, widget: &FieldWidget) {
    let key = format!("{prefix}{}", widget.key());
    let value = match widget {
        FieldWidget::Text(_) => truncate_str(&display_value(&widget.value()), VALUE_WIDTH),
        FieldWidget::Partials(field) => format!("[{} items]", field.items().len()),
    };
    rows.push(vec![
        key.clone(),
        widget.field_type().to_string(),
        widget.label().to_string(),
        value,
    ]);

    if let FieldWidget::Partials(field) = widget {
        for (index, item) in field.items().iter().enumerate() {
            let item_key = format!("{key}.{index}");
            match item {
                PartialItem::Container(container) => {
                    rows.push(vec![
                        item_key.clone(),
                        container.key().to_string(),
                        container.display_label(),
                        String::new(),
                    ]);
                    for nested in container.fields() {
                        push_widget(rows, &format!("{item_key}."), nested);
                    }
                }
                PartialItem::Verbatim(value) => rows.push(vec![
                    item_key,
                    "?".to_string(),
                    "(no definition)".to_string(),
                    truncate_str(&value.to_string(), VALUE_WIDTH),
                ]),
            }
        }
    }
}
