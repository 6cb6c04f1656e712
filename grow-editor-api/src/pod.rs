//! Editor API backed by a pod directory on the local filesystem.
//!
//! Layout:
//! ```text
//! <pod_root>/
//!   content/<collection>/_blueprint.yaml   ← `$path` pattern, `editor.fields`
//!   content/<collection>/<doc>.yaml        ← default-locale document
//!   content/<collection>/<doc>@<loc>.yaml  ← localized document
//!   partials/<key>.yaml                    ← partial definitions
//! ```

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use grow_editor_fields::{atomic_write, FieldMeta, PartialRegistry};
use indexmap::IndexMap;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, instrument, warn};

use crate::client::EditorApi;
use crate::error::{ApiError, Result};
use crate::frontmatter::{parse_document, render_document, ParsedDocument, TagSet};
use crate::types::{Document, FrontMatterMap, PartialsResponse, SavedDocument};

/// File name of a collection's blueprint.
pub const BLUEPRINT_FILE: &str = "_blueprint.yaml";

/// Directory, relative to the pod root, holding partial definitions.
pub const PARTIALS_DIR: &str = "partials";

#[derive(Debug, Default, Deserialize)]
struct Blueprint {
    #[serde(rename = "$path", default)]
    path: Option<String>,
    #[serde(default)]
    editor: BlueprintEditor,
}

#[derive(Debug, Default, Deserialize)]
struct BlueprintEditor {
    #[serde(default)]
    fields: Vec<FieldMeta>,
}

/// Editor API reading and writing pod files directly.
#[derive(Debug, Clone)]
pub struct PodEditorApi {
    root: PathBuf,
    default_locale: String,
}

impl PodEditorApi {
    pub fn new(root: impl Into<PathBuf>, default_locale: &str) -> Self {
        Self {
            root: root.into(),
            default_locale: default_locale.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a pod path to a file under the root, refusing anything that escapes it.
    fn resolve(&self, pod_path: &str) -> Result<PathBuf> {
        let relative = Path::new(pod_path.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(ApiError::InvalidPodPath(pod_path.to_string()));
        }
        for component in relative.components() {
            if !matches!(component, Component::Normal(_) | Component::CurDir) {
                return Err(ApiError::InvalidPodPath(pod_path.to_string()));
            }
        }
        Ok(self.root.join(relative))
    }

    /// Read and parse a document, `None` if the file does not exist.
    async fn read(&self, pod_path: &str) -> Result<Option<ParsedDocument>> {
        let path = self.resolve(pod_path)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(parse_document(&content, pod_path)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn blueprint(&self, pod_path: &str) -> Result<Blueprint> {
        let path = self.resolve(pod_path)?;
        let Some(dir) = path.parent() else {
            return Ok(Blueprint::default());
        };
        let blueprint_path = dir.join(BLUEPRINT_FILE);
        match fs::read_to_string(&blueprint_path).await {
            Ok(content) if content.trim().is_empty() => Ok(Blueprint::default()),
            Ok(content) => Ok(serde_yaml_ng::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Blueprint::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Serving path of a document: its own `$path`, else the blueprint pattern.
    fn serving_path(front_matter: &FrontMatterMap, blueprint: &Blueprint, pod_path: &str) -> Option<String> {
        if let Some(path) = front_matter.get("$path").and_then(|v| v.as_str()) {
            return Some(path.to_string());
        }
        let base = base_name(pod_path);
        blueprint
            .path
            .as_ref()
            .map(|pattern| pattern.replace("{base}", base))
    }

    /// Localized variants of a document that declare their own `$path`.
    async fn localized_serving_paths(&self, pod_path: &str) -> Result<IndexMap<String, String>> {
        let mut paths = IndexMap::new();
        let path = self.resolve(pod_path)?;
        let (Some(dir), Some(stem), Some(ext)) = (
            path.parent(),
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|s| s.to_str()),
        ) else {
            return Ok(paths);
        };
        match fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(paths),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(paths),
            Err(e) => return Err(e.into()),
        }

        let prefix = format!("{stem}@");
        let suffix = format!(".{ext}");
        let mut found = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(locale) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
            {
                found.push((locale.to_string(), entry.path()));
            }
        }
        found.sort();

        for (locale, file) in found {
            let localized = localized_pod_path(pod_path, &locale);
            let content = fs::read_to_string(&file).await?;
            match parse_document(&content, &localized) {
                Ok(doc) => {
                    if let Some(path) = doc.front_matter.get("$path").and_then(|v| v.as_str()) {
                        paths.insert(locale, path.to_string());
                    }
                }
                Err(e) => warn!(pod_path = %localized, %e, "skipping unreadable localized document"),
            }
        }
        Ok(paths)
    }

    async fn document(&self, pod_path: &str, front_matter: FrontMatterMap) -> Result<Document> {
        let blueprint = self.blueprint(pod_path).await?;
        let mut serving_paths = IndexMap::new();
        if let Some(path) = Self::serving_path(&front_matter, &blueprint, pod_path) {
            serving_paths.insert(self.default_locale.clone(), path);
        }
        for (locale, path) in self.localized_serving_paths(pod_path).await? {
            serving_paths.entry(locale).or_insert(path);
        }

        Ok(Document {
            pod_path: pod_path.to_string(),
            fields: blueprint.editor.fields,
            front_matter,
            serving_paths,
            default_locale: self.default_locale.clone(),
        })
    }
}

/// File stem of a pod path, without any `@locale` suffix.
fn base_name(pod_path: &str) -> &str {
    let file = pod_path.rsplit('/').next().unwrap_or(pod_path);
    let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
    stem.split_once('@').map_or(stem, |(base, _)| base)
}

/// `/content/pages/home.yaml` + `de` → `/content/pages/home@de.yaml`.
pub fn localized_pod_path(pod_path: &str, locale: &str) -> String {
    let (dir, file) = match pod_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, pod_path),
    };
    let file = match file.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}@{locale}.{ext}"),
        None => format!("{file}@{locale}"),
    };
    match dir {
        Some(dir) => format!("{dir}/{file}"),
        None => file,
    }
}

#[async_trait]
impl EditorApi for PodEditorApi {
    #[instrument(skip(self))]
    async fn get_document(&self, pod_path: &str) -> Result<Document> {
        let parsed = self
            .read(pod_path)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("document not found: {pod_path}")))?;
        let document = self.document(pod_path, parsed.front_matter).await?;
        debug!(fields = document.fields.len(), "document loaded from pod");
        Ok(document)
    }

    #[instrument(skip(self))]
    async fn get_partials(&self, pod_path: &str) -> Result<PartialsResponse> {
        let registry = PartialRegistry::open(self.root.join(PARTIALS_DIR)).build().await?;
        Ok(PartialsResponse {
            partials: registry.into_definitions(),
        })
    }

    #[instrument(skip(self, front_matter))]
    async fn save_document(
        &self,
        pod_path: &str,
        front_matter: &FrontMatterMap,
        locale: &str,
    ) -> Result<SavedDocument> {
        let target = if locale.is_empty() || locale == self.default_locale {
            pod_path.to_string()
        } else {
            localized_pod_path(pod_path, locale)
        };
        let path = self.resolve(&target)?;

        // Keep the body of an existing markdown/html document. Tags come from
        // the file being replaced and from the base document.
        let (body, mut tags) = match self.read(&target).await? {
            Some(existing) => (existing.body, existing.tags),
            None if crate::frontmatter::is_yaml_document(&target) => (None, TagSet::new()),
            None => (Some(String::new()), TagSet::new()),
        };
        if target != pod_path {
            if let Some(base) = self.read(pod_path).await? {
                tags.extend(base.tags);
            }
        }
        let parsed = ParsedDocument {
            front_matter: front_matter.clone(),
            body,
            tags,
        };
        let content = render_document(&parsed)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        atomic_write(&path, content.as_bytes()).await?;
        debug!(pod_path = %target, %locale, "document saved");

        let stored = self
            .read(&target)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("document not found: {target}")))?;
        let serving_paths = match self.read(pod_path).await? {
            Some(base) => self.document(pod_path, base.front_matter).await?.serving_paths,
            None => self.localized_serving_paths(pod_path).await?,
        };
        Ok(SavedDocument {
            pod_path: pod_path.to_string(),
            front_matter: stored.front_matter,
            serving_paths,
            default_locale: self.default_locale.clone(),
        })
    }
}
