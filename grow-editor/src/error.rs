//! Error types for the editor

use grow_editor_api::ApiError;
use thiserror::Error;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur while building or editing a form
#[derive(Debug, Error)]
pub enum EditorError {
    /// The backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A value whose shape the widget cannot hold
    #[error("invalid value for field '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Empty path or empty path segment
    #[error("invalid path: '{path}'")]
    InvalidPath { path: String },

    /// Path runs through a scalar or past the end of a list
    #[error("path conflict at '{path}'")]
    PathConflict { path: String },

    /// No definition for a partial key
    #[error("unknown partial: {key}")]
    UnknownPartial { key: String },

    /// Value tagged with a different partial than the container
    #[error("value for partial '{found}' cannot update partial '{expected}'")]
    PartialMismatch { expected: String, found: String },

    /// No widget bound to a key
    #[error("no field with key '{key}'")]
    UnknownField { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = EditorError::InvalidValue {
            key: "meta.description".into(),
            message: "expected text".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for field 'meta.description': expected text"
        );
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err = EditorError::from(ApiError::NotFound("document not found: /a.yaml".into()));
        assert_eq!(err.to_string(), "not found: document not found: /a.yaml");
    }
}
