//! Editing session for a single document.

use std::sync::Arc;

use grow_editor_api::{Document, EditorApi, FrontMatterMap, SavedDocument};
use grow_editor_fields::PartialDefinitions;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::{EditorError, Result};
use crate::field::{bind_fields, write_back, FieldWidget};
use crate::front_matter::FrontMatter;
use crate::partials::Partials;

/// A document's widgets, bound to its front matter.
pub struct DocumentEditor {
    api: Arc<dyn EditorApi>,
    document: Document,
    definitions: Arc<PartialDefinitions>,
    fields: Vec<FieldWidget>,
}

impl DocumentEditor {
    /// Fetch the document and its partials concurrently and build the form.
    #[instrument(skip(api))]
    pub async fn load(api: Arc<dyn EditorApi>, pod_path: &str) -> Result<Self> {
        let partials = Partials::new(Arc::clone(&api), pod_path);
        Self::load_with(api, &partials, pod_path).await
    }

    /// Like [`load`](Self::load), reusing partials that may already be resolved.
    pub async fn load_with(
        api: Arc<dyn EditorApi>,
        partials: &Partials,
        pod_path: &str,
    ) -> Result<Self> {
        let (document, definitions) = futures::try_join!(
            async { api.get_document(pod_path).await.map_err(EditorError::from) },
            partials.definitions(),
        )?;
        Self::from_parts(api, document, definitions)
    }

    pub fn from_parts(
        api: Arc<dyn EditorApi>,
        document: Document,
        definitions: Arc<PartialDefinitions>,
    ) -> Result<Self> {
        let source = FrontMatter::from_map(document.front_matter.clone());
        let fields = bind_fields(&document.fields, &source, &definitions)?;
        debug!(
            pod_path = %document.pod_path,
            fields = fields.len(),
            partials = definitions.len(),
            "editor ready"
        );
        Ok(Self {
            api,
            document,
            definitions,
            fields,
        })
    }

    pub fn pod_path(&self) -> &str {
        &self.document.pod_path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn default_locale(&self) -> &str {
        &self.document.default_locale
    }

    pub fn serving_paths(&self) -> &IndexMap<String, String> {
        &self.document.serving_paths
    }

    pub fn definitions(&self) -> &PartialDefinitions {
        &self.definitions
    }

    pub fn fields(&self) -> &[FieldWidget] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldWidget> {
        self.fields.iter().find(|f| f.key() == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldWidget> {
        self.fields.iter_mut().find(|f| f.key() == key)
    }

    /// Replace the value of the widget bound to `key`.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.field_mut(key)
            .ok_or_else(|| EditorError::UnknownField {
                key: key.to_string(),
            })?
            .set_value(value)
    }

    /// The loaded front matter with every widget value written back.
    pub fn front_matter(&self) -> Result<FrontMatter> {
        let source = FrontMatter::from_map(self.document.front_matter.clone());
        write_back(&source, &self.fields)
    }

    pub fn is_dirty(&self) -> bool {
        match self.front_matter() {
            Ok(current) => current.as_value() != &Value::Object(self.document.front_matter.clone()),
            Err(_) => true,
        }
    }

    /// Save under `locale`, or the document's default locale, then rebind the
    /// widgets to the front matter the backend returns.
    #[instrument(skip(self), fields(pod_path = %self.document.pod_path))]
    pub async fn save(&mut self, locale: Option<&str>) -> Result<SavedDocument> {
        let locale = locale
            .unwrap_or(&self.document.default_locale)
            .to_string();
        let front_matter: FrontMatterMap = self.front_matter()?.into_map();

        let saved = self
            .api
            .save_document(&self.document.pod_path, &front_matter, &locale)
            .await?;
        info!(%locale, "document saved");

        let source = FrontMatter::from_map(saved.front_matter.clone());
        self.fields = bind_fields(&self.document.fields, &source, &self.definitions)?;
        self.document.front_matter = saved.front_matter.clone();
        self.document.serving_paths = saved.serving_paths.clone();
        Ok(saved)
    }
}

impl std::fmt::Debug for DocumentEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentEditor")
            .field("pod_path", &self.document.pod_path)
            .field("fields", &self.fields.len())
            .finish()
    }
}
