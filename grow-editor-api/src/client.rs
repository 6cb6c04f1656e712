//! The editor API trait and backend selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Backend, EditorConfig};
use crate::error::Result;
use crate::http::HttpEditorApi;
use crate::mock::MockEditorApi;
use crate::pod::PodEditorApi;
use crate::types::{Document, FrontMatterMap, PartialsResponse, SavedDocument};

/// Operations the editor needs from a pod.
///
/// Each call resolves exactly once, with either the decoded record or an
/// [`ApiError`](crate::ApiError).
#[async_trait]
pub trait EditorApi: Send + Sync {
    /// Fetch a document, its editable field metadata and its front matter.
    async fn get_document(&self, pod_path: &str) -> Result<Document>;

    /// Fetch the partial definitions available to a document.
    async fn get_partials(&self, pod_path: &str) -> Result<PartialsResponse>;

    /// Store new front matter for a document in the given locale.
    async fn save_document(
        &self,
        pod_path: &str,
        front_matter: &FrontMatterMap,
        locale: &str,
    ) -> Result<SavedDocument>;
}

#[async_trait]
impl<T: EditorApi + ?Sized> EditorApi for Arc<T> {
    async fn get_document(&self, pod_path: &str) -> Result<Document> {
        (**self).get_document(pod_path).await
    }

    async fn get_partials(&self, pod_path: &str) -> Result<PartialsResponse> {
        (**self).get_partials(pod_path).await
    }

    async fn save_document(
        &self,
        pod_path: &str,
        front_matter: &FrontMatterMap,
        locale: &str,
    ) -> Result<SavedDocument> {
        (**self).save_document(pod_path, front_matter, locale).await
    }
}

/// Build the backend named by the configuration.
pub fn connect(config: &EditorConfig) -> Result<Arc<dyn EditorApi>> {
    debug!(backend = ?config.backend, "connecting editor api");
    let api: Arc<dyn EditorApi> = match config.backend {
        Backend::Mock => Arc::new(MockEditorApi::new()),
        Backend::Http => Arc::new(HttpEditorApi::new(config)?),
        Backend::Pod => Arc::new(PodEditorApi::new(&config.pod_root, &config.default_locale)),
    };
    Ok(api)
}
