//! HTTP client for a running editor server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::client::EditorApi;
use crate::config::EditorConfig;
use crate::error::{ApiError, Result};
use crate::types::{Document, FrontMatterMap, PartialsResponse, SaveRequest, SavedDocument};

/// Path of the document endpoint, relative to the server root.
pub const CONTENT_ENDPOINT: &str = "/_grow/api/editor/content";

/// Path of the partials endpoint, relative to the server root.
pub const PARTIALS_ENDPOINT: &str = "/_grow/api/editor/partials";

/// Extract a human-readable message from a JSON error body.
///
/// Tries `error_description`, then `message`, then falls back to the raw body.
fn extract_error_description(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(desc) = json.get("error_description").and_then(|v| v.as_str()) {
            return desc.to_string();
        }
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    body.to_string()
}

/// Validate a server root URL and strip its trailing slash.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(base_url.trim_end_matches('/').to_string()),
        scheme => Err(ApiError::InvalidUrl(format!(
            "{base_url}: unsupported scheme '{scheme}'"
        ))),
    }
}

/// Editor API backend speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEditorApi {
    client: Client,
    base_url: String,
}

impl HttpEditorApi {
    /// Build a client from configuration: base URL, timeout and user agent.
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, pod_path: Option<&str>) -> String {
        match pod_path {
            Some(pod_path) => format!(
                "{}{}?pod_path={}",
                self.base_url,
                path,
                urlencoding::encode(pod_path)
            ),
            None => format!("{}{}", self.base_url, path),
        }
    }

    /// Map a non-success response to an `ApiError` by status, else decode the body.
    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = extract_error_description(&body);
        debug!(status = status.as_u16(), %message, "editor api request failed");
        match status.as_u16() {
            401 => Err(ApiError::Unauthorized(message)),
            403 => Err(ApiError::Forbidden(message)),
            404 => Err(ApiError::NotFound(message)),
            409 => Err(ApiError::Conflict(message)),
            code => Err(ApiError::Api {
                status: code,
                body: message,
            }),
        }
    }
}

#[async_trait]
impl EditorApi for HttpEditorApi {
    #[instrument(skip(self))]
    async fn get_document(&self, pod_path: &str) -> Result<Document> {
        let url = self.endpoint(CONTENT_ENDPOINT, Some(pod_path));
        let response = self.client.get(&url).send().await?;
        let document: Document = self.decode(response).await?;
        debug!(fields = document.fields.len(), "document loaded");
        Ok(document)
    }

    #[instrument(skip(self))]
    async fn get_partials(&self, pod_path: &str) -> Result<PartialsResponse> {
        let url = self.endpoint(PARTIALS_ENDPOINT, Some(pod_path));
        let response = self.client.get(&url).send().await?;
        let partials: PartialsResponse = self.decode(response).await?;
        debug!(partials = partials.partials.len(), "partials loaded");
        Ok(partials)
    }

    #[instrument(skip(self, front_matter))]
    async fn save_document(
        &self,
        pod_path: &str,
        front_matter: &FrontMatterMap,
        locale: &str,
    ) -> Result<SavedDocument> {
        let url = self.endpoint(CONTENT_ENDPOINT, None);
        let request = SaveRequest {
            pod_path: pod_path.to_string(),
            front_matter: front_matter.clone(),
            locale: locale.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        self.decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_description_preferred() {
        let body = r#"{"error_description": "token expired", "message": "other"}"#;
        assert_eq!(extract_error_description(body), "token expired");
    }

    #[test]
    fn error_message_fallback() {
        assert_eq!(extract_error_description(r#"{"message": "gone"}"#), "gone");
        assert_eq!(extract_error_description("plain text"), "plain text");
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn base_url_requires_http_scheme() {
        assert!(matches!(
            normalize_base_url("file:///tmp"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(normalize_base_url("not a url"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn endpoint_encodes_pod_path() {
        let api = HttpEditorApi::with_client(Client::new(), "http://localhost:8080").unwrap();
        assert_eq!(
            api.endpoint(CONTENT_ENDPOINT, Some("/content/pages/home.yaml")),
            "http://localhost:8080/_grow/api/editor/content?pod_path=%2Fcontent%2Fpages%2Fhome.yaml"
        );
    }
}
