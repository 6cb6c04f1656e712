//! On-disk store of a pod's partial definitions.
//!
//! Each partial lives in its own `<key>.yaml` file inside one directory
//! (a pod's `partials/`). The registry loads them into an ordered map sorted
//! by key so that listings are stable across platforms.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::types::{PartialDef, PartialDefinitions};

/// Default partial definitions written on first open.
pub struct PartialDefaults {
    partials: Vec<(String, PartialDef)>,
}

impl PartialDefaults {
    pub fn new() -> Self {
        Self {
            partials: Vec::new(),
        }
    }

    /// Add a default partial definition.
    pub fn partial(mut self, key: impl Into<String>, def: PartialDef) -> Self {
        self.partials.push((key.into(), def));
        self
    }

    pub fn partials(&self) -> &[(String, PartialDef)] {
        &self.partials
    }
}

impl Default for PartialDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `PartialRegistry`. Created by `PartialRegistry::open()`.
pub struct PartialRegistryBuilder {
    root: PathBuf,
    defaults: Option<PartialDefaults>,
    create: bool,
}

impl PartialRegistryBuilder {
    /// Seed defaults that don't already exist on disk. Implies `create(true)`.
    pub fn with_defaults(mut self, defaults: PartialDefaults) -> Self {
        self.defaults = Some(defaults);
        self.create = true;
        self
    }

    /// Create the directory when it is missing instead of treating it as empty.
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Build the registry: optionally create the directory, seed defaults, load.
    pub async fn build(self) -> Result<PartialRegistry> {
        let root = self.root;

        if self.create {
            fs::create_dir_all(&root).await?;
        }

        if let Some(defaults) = self.defaults {
            seed_defaults(&root, &defaults).await?;
        }

        let mut registry = PartialRegistry {
            root,
            partials: PartialDefinitions::new(),
        };
        registry.load().await?;

        debug!(
            partials = registry.partials.len(),
            root = %registry.root.display(),
            "partial registry opened"
        );

        Ok(registry)
    }
}

async fn seed_defaults(root: &Path, defaults: &PartialDefaults) -> Result<()> {
    for (key, def) in defaults.partials() {
        let path = partial_path(root, key)?;
        if !fs::try_exists(&path).await? {
            let yaml = serde_yaml_ng::to_string(def)?;
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(%key, "seeded default partial");
        }
    }
    Ok(())
}

fn partial_path(root: &Path, key: &str) -> Result<PathBuf> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(FieldsError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(root.join(format!("{key}.yaml")))
}

/// A pod's partial definitions, backed by a directory of YAML files.
pub struct PartialRegistry {
    root: PathBuf,
    partials: PartialDefinitions,
}

impl PartialRegistry {
    /// Open a partials directory. A missing directory loads as empty unless
    /// the builder is asked to create it.
    ///
    /// ```rust,ignore
    /// let registry = PartialRegistry::open(pod_root.join("partials")).build().await?;
    /// let hero = registry.get("hero");
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> PartialRegistryBuilder {
        PartialRegistryBuilder {
            root: root.into(),
            defaults: None,
            create: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PartialDef> {
        self.partials.get(key)
    }

    /// All definitions, sorted by key.
    pub fn all(&self) -> &PartialDefinitions {
        &self.partials
    }

    pub fn into_definitions(self) -> PartialDefinitions {
        self.partials
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write (create or replace) a partial definition. Persists immediately.
    pub async fn write(&mut self, key: &str, def: &PartialDef) -> Result<()> {
        let path = partial_path(&self.root, key)?;
        let yaml = serde_yaml_ng::to_string(def)?;
        atomic_write(&path, yaml.as_bytes()).await?;

        self.partials.insert(key.to_string(), def.clone());
        self.partials.sort_keys();
        Ok(())
    }

    /// Delete a partial definition by key. A file already gone is not an error.
    pub async fn delete(&mut self, key: &str) -> Result<()> {
        if !self.partials.contains_key(key) {
            return Err(FieldsError::PartialNotFound {
                key: key.to_string(),
            });
        }
        let path = partial_path(&self.root, key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.partials.shift_remove(key);
        Ok(())
    }

    async fn load(&mut self) -> Result<()> {
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if key.starts_with('.') {
                continue;
            }
            let key = key.to_string();
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<PartialDef>(&content) {
                Ok(def) => {
                    self.partials.insert(key, def);
                }
                Err(e) => {
                    warn!(?path, %e, "skipping invalid partial definition");
                }
            }
        }
        self.partials.sort_keys();
        Ok(())
    }
}

/// Write to a temp file in the same directory, then rename over `path`.
pub async fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
