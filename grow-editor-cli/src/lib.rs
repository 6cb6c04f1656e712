//! grow-editor command-line interface.

pub mod cli;
pub mod edit;
pub mod error;
pub mod partials;
pub mod show;
pub mod table;

pub use cli::{BackendArg, Cli, Commands, OutputFormat};
pub use error::CliError;

use std::path::Path;

use grow_editor_api::{Backend, ConfigLoader, EditorConfig};

/// Load configuration, layering an explicit file and a backend override on top.
pub fn load_config(
    file: Option<&Path>,
    backend: Option<BackendArg>,
) -> Result<EditorConfig, CliError> {
    let mut loader = ConfigLoader::new();
    if let Some(file) = file {
        loader = loader.with_file(file);
    }
    let mut config = loader.load()?;
    if let Some(backend) = backend {
        config.backend = match backend {
            BackendArg::Mock => Backend::Mock,
            BackendArg::Http => Backend::Http,
            BackendArg::Pod => Backend::Pod,
        };
    }
    Ok(config)
}
