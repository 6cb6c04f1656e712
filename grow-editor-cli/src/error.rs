//! Errors surfaced by CLI commands.

use grow_editor::EditorError;
use grow_editor_api::{ApiError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    /// `--set` argument without a `=` or with an empty key
    #[error("invalid assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),

    #[error("invalid value for '{key}': {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render output: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
