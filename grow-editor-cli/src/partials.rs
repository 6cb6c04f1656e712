//! `grow-editor partials` - list partial definitions.

use std::sync::Arc;

use grow_editor_api::EditorApi;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::table::new_table;

/// Run the partials command.
pub async fn run_partials(
    api: Arc<dyn EditorApi>,
    pod_path: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let response = api.get_partials(pod_path).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&response)?),
        OutputFormat::Table => {
            if response.partials.is_empty() {
                println!("No partials defined.");
                return Ok(());
            }
            let mut table = new_table();
            table.set_header(vec!["Partial", "Label", "Fields"]);
            for (key, def) in &response.partials {
                let fields = def
                    .fields
                    .iter()
                    .map(|f| format!("{} ({}): {}", f.key, f.type_, f.label))
                    .collect::<Vec<_>>()
                    .join("\n");
                table.add_row(vec![key.clone(), def.label.clone(), fields]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
