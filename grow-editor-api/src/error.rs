//! Error types for editor API calls

use grow_editor_fields::FieldsError;
use thiserror::Error;

/// Result type for editor API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by any [`EditorApi`](crate::EditorApi) backend.
///
/// The mock backend never produces one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401: missing or rejected credentials
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// 403: caller may not access this document
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 404, or a pod path with no file behind it
    #[error("not found: {0}")]
    NotFound(String),

    /// 409: the document changed underneath the editor
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A response or request body that is not the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pod file that is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pod path that is empty or escapes the pod root
    #[error("invalid pod path: {0}")]
    InvalidPodPath(String),

    /// Document whose front matter is not a mapping
    #[error("invalid document {pod_path}: {message}")]
    InvalidDocument { pod_path: String, message: String },

    /// Base URL that does not parse or is not http(s)
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Partial registry failure
    #[error(transparent)]
    Fields(#[from] FieldsError),
}
