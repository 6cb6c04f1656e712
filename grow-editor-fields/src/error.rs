//! Error types for field metadata and the partial registry

use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in partial registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Partial definition not found by key
    #[error("partial not found: {key}")]
    PartialNotFound { key: String },

    /// Partial key cannot be used as a file name
    #[error("invalid partial key: '{key}'")]
    InvalidKey { key: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
