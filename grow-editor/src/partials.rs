//! Partial definitions fetched on first use and shared afterwards.

use std::sync::Arc;

use grow_editor_api::EditorApi;
use grow_editor_fields::PartialDefinitions;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{EditorError, Result};
use crate::partial::PartialContainer;

/// Lazily resolved partial definitions for one pod path.
///
/// The first call to [`definitions`](Self::definitions) issues the request;
/// concurrent callers wait on it. A failed request leaves the cell empty so the
/// next caller retries.
pub struct Partials {
    api: Arc<dyn EditorApi>,
    pod_path: String,
    cell: OnceCell<Arc<PartialDefinitions>>,
}

impl Partials {
    pub fn new(api: Arc<dyn EditorApi>, pod_path: impl Into<String>) -> Self {
        Self {
            api,
            pod_path: pod_path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Already-resolved definitions, for example from a previous load.
    pub fn resolved(
        api: Arc<dyn EditorApi>,
        pod_path: impl Into<String>,
        definitions: PartialDefinitions,
    ) -> Self {
        Self {
            api,
            pod_path: pod_path.into(),
            cell: OnceCell::new_with(Some(Arc::new(definitions))),
        }
    }

    pub fn pod_path(&self) -> &str {
        &self.pod_path
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn definitions(&self) -> Result<Arc<PartialDefinitions>> {
        let definitions = self
            .cell
            .get_or_try_init(|| async {
                let response = self.api.get_partials(&self.pod_path).await?;
                debug!(
                    pod_path = %self.pod_path,
                    count = response.partials.len(),
                    "partials resolved"
                );
                Ok::<_, EditorError>(Arc::new(response.partials))
            })
            .await?;
        Ok(Arc::clone(definitions))
    }

    /// Build a container for one instance of `key`.
    pub async fn container_for(&self, key: &str, front_matter: &Value) -> Result<PartialContainer> {
        let definitions = self.definitions().await?;
        let def = definitions
            .get(key)
            .ok_or_else(|| EditorError::UnknownPartial {
                key: key.to_string(),
            })?;
        PartialContainer::new(key, def.label.clone(), front_matter, &def.fields, &definitions)
    }
}

impl std::fmt::Debug for Partials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partials")
            .field("pod_path", &self.pod_path)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
