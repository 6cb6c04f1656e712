//! Fixed sample responses for offline editing and tests.

use async_trait::async_trait;
use grow_editor_fields::{FieldMeta, PartialDef, PartialDefinitions};
use indexmap::IndexMap;
use serde_json::json;
use tracing::debug;

use crate::client::EditorApi;
use crate::error::Result;
use crate::logging::Pretty;
use crate::types::{into_map, Document, FrontMatterMap, PartialsResponse, SaveRequest, SavedDocument};

/// Pod path of the sample document.
pub const SAMPLE_POD_PATH: &str = "/content/pages/home.yaml";

/// Backend that answers every call with the same sample records.
///
/// The pod path argument is ignored and no call ever fails, so callers can
/// exercise the editor without a server.
#[derive(Debug, Clone, Default)]
pub struct MockEditorApi;

impl MockEditorApi {
    pub fn new() -> Self {
        Self
    }

    /// The sample home page document.
    pub fn sample_document() -> Document {
        Document {
            pod_path: SAMPLE_POD_PATH.to_string(),
            fields: vec![
                FieldMeta::text("$path", "Serving Path"),
                FieldMeta::text("$title", "Title"),
                FieldMeta::textarea("meta.description", "Description"),
                FieldMeta::partials("partials", "Partials"),
            ],
            front_matter: into_map(json!({
                "$title": "Blinkk",
                "$path": "/",
                "meta": {
                    "description": "Something really cool.",
                },
                "partials": [
                    {
                        "partial": "hero",
                        "title": "Blinkk",
                        "subtitle": "New to Blinkk?",
                        "description": "Great! This site is to help you get up to speed on how Blinkk works and some of the projects that we have going.",
                        "cta": [
                            {
                                "title": "Getting Started",
                                "url": "!g.url \"/content/pages/getting-started.yaml\"",
                            },
                            {
                                "title": "Blinkk Projects",
                                "url": "!g.url \"/content/pages/projects.yaml\"",
                            },
                        ],
                    },
                ],
            })),
            serving_paths: english_root(),
            default_locale: "en".to_string(),
        }
    }

    /// The sample partial definitions: a single `hero` partial.
    pub fn sample_partials() -> PartialsResponse {
        let mut partials = PartialDefinitions::new();
        partials.insert(
            "hero".to_string(),
            PartialDef::new("Hero")
                .field(FieldMeta::text("title", "Hero Title"))
                .field(FieldMeta::text("subtitle", "Hero Subtitle"))
                .field(FieldMeta::textarea("description", "Description")),
        );
        PartialsResponse { partials }
    }

    /// The sample response to any save.
    pub fn sample_saved() -> SavedDocument {
        SavedDocument {
            pod_path: SAMPLE_POD_PATH.to_string(),
            front_matter: into_map(json!({
                "$title": "Blinkk Team",
                "$path": "/something",
                "meta": {
                    "description": "Something really really cool.",
                },
            })),
            serving_paths: english_root(),
            default_locale: "en".to_string(),
        }
    }
}

fn english_root() -> IndexMap<String, String> {
    let mut paths = IndexMap::new();
    paths.insert("en".to_string(), "/".to_string());
    paths
}

#[async_trait]
impl EditorApi for MockEditorApi {
    async fn get_document(&self, pod_path: &str) -> Result<Document> {
        debug!(%pod_path, "mock get_document");
        Ok(Self::sample_document())
    }

    async fn get_partials(&self, pod_path: &str) -> Result<PartialsResponse> {
        debug!(%pod_path, "mock get_partials");
        Ok(Self::sample_partials())
    }

    async fn save_document(
        &self,
        pod_path: &str,
        front_matter: &FrontMatterMap,
        locale: &str,
    ) -> Result<SavedDocument> {
        let request = SaveRequest {
            pod_path: pod_path.to_string(),
            front_matter: front_matter.clone(),
            locale: locale.to_string(),
        };
        debug!("save request: {}", Pretty(&request));
        Ok(Self::sample_saved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn document_has_all_parts() {
        let doc = MockEditorApi::new().get_document("/any").await.unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        for key in ["pod_path", "fields", "front_matter", "serving_paths", "default_locale"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(doc.fields.len(), 4);
    }

    #[tokio::test]
    async fn document_title_and_serving_path() {
        let doc = MockEditorApi::new().get_document(SAMPLE_POD_PATH).await.unwrap();
        assert_eq!(doc.front_matter["$title"], "Blinkk");
        assert_eq!(doc.serving_paths["en"], "/");
    }

    #[tokio::test]
    async fn partials_has_hero_with_three_fields() {
        let response = MockEditorApi::new().get_partials(SAMPLE_POD_PATH).await.unwrap();
        let hero = response.partials.get("hero").unwrap();
        assert_eq!(hero.label, "Hero");
        assert_eq!(hero.fields.len(), 3);
    }

    #[tokio::test]
    async fn save_ignores_input() {
        let api = MockEditorApi::new();
        let saved = api
            .save_document("/elsewhere.yaml", &FrontMatterMap::new(), "de")
            .await
            .unwrap();
        assert_eq!(saved.pod_path, SAMPLE_POD_PATH);
        assert_eq!(saved.front_matter["$title"], "Blinkk Team");
        assert_eq!(saved.front_matter["$path"], "/something");
    }
}
