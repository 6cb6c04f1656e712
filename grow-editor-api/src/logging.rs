//! Log formatting helpers.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing serializable values in logs as YAML.
///
/// ```ignore
/// use grow_editor_api::Pretty;
/// tracing::debug!("save request: {}", Pretty(&request));
/// ```
///
/// Debug formatting is used when YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}
