//! Editor configuration loaded with figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. `~/.grow-editor/config.{toml,yaml,yml,json}`
//! 3. `./.grow-editor/config.{toml,yaml,yml,json}`
//! 4. An explicit file (`--config`)
//! 5. Environment variables prefixed `GROW_EDITOR_` (e.g. `GROW_EDITOR_BASE_URL`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GROW_EDITOR_";

/// Directory name searched in the home and current directories.
pub const CONFIG_DIR_NAME: &str = ".grow-editor";

const CONFIG_FILE_STEM: &str = "config";
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 120;

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] figment::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration file extension not supported
    #[error("Unsupported configuration file format: {format}")]
    UnsupportedFormat { format: String },
}

/// Which [`EditorApi`](crate::EditorApi) implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Fixed sample data
    #[default]
    Mock,
    /// Running editor server
    Http,
    /// Pod directory on disk
    Pod,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub backend: Backend,
    /// Root URL of the editor server (http backend).
    pub base_url: String,
    /// Pod directory (pod backend).
    pub pod_root: PathBuf,
    /// Request timeout in seconds, 1 to 120.
    pub timeout_secs: u64,
    /// Locale used when a save names none.
    pub default_locale: String,
    pub user_agent: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Mock,
            base_url: "http://localhost:8080".to_string(),
            pod_root: PathBuf::from("."),
            timeout_secs: 30,
            default_locale: "en".to_string(),
            user_agent: format!("grow-editor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EditorConfig {
    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: format!(
                    "must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds"
                ),
            });
        }
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "default_locale".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads [`EditorConfig`] from files and the environment. No caching: every
/// `load()` reads fresh.
pub struct ConfigLoader {
    search_dirs: Vec<PathBuf>,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Search `~/.grow-editor/` then `./.grow-editor/`.
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home.join(CONFIG_DIR_NAME));
        }
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd.join(CONFIG_DIR_NAME));
        }
        Self {
            search_dirs,
            explicit: None,
        }
    }

    /// Replace the searched directories, lowest precedence first.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Layer an explicit file above the discovered ones.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn load(&self) -> ConfigResult<EditorConfig> {
        let config: EditorConfig = self.build_figment()?.extract()?;
        config.validate()?;
        debug!(backend = ?config.backend, "configuration loaded");
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(EditorConfig::default()));

        for dir in &self.search_dirs {
            for ext in ["toml", "yaml", "yml", "json"] {
                let path = dir.join(format!("{CONFIG_FILE_STEM}.{ext}"));
                if path.is_file() {
                    trace!(path = %path.display(), "loading config file");
                    figment = figment.merge(file_provider(&path)?);
                }
            }
        }

        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            figment = figment.merge(file_provider(path)?);
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn file_provider(path: &Path) -> ConfigResult<Figment> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat {
            format: other.unwrap_or("").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().with_search_dirs(Vec::new())
    }

    #[test]
    #[serial]
    fn defaults_without_sources() {
        let config = isolated().load().unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.backend, Backend::Mock);
    }

    #[test]
    #[serial]
    fn project_file_overrides_global() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            global.path().join("config.toml"),
            "backend = \"http\"\nbase_url = \"http://global:1\"\n",
        )
        .unwrap();
        fs::write(project.path().join("config.yaml"), "base_url: http://project:2\n").unwrap();

        let config = ConfigLoader::new()
            .with_search_dirs(vec![global.path().to_path_buf(), project.path().to_path_buf()])
            .load()
            .unwrap();
        assert_eq!(config.backend, Backend::Http);
        assert_eq!(config.base_url, "http://project:2");
    }

    #[test]
    #[serial]
    fn env_overrides_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("editor.json");
        fs::write(&file, r#"{"backend": "pod", "pod_root": "/srv/pod"}"#).unwrap();

        std::env::set_var("GROW_EDITOR_POD_ROOT", "/tmp/other-pod");
        let config = isolated().with_file(&file).load();
        std::env::remove_var("GROW_EDITOR_POD_ROOT");

        let config = config.unwrap();
        assert_eq!(config.backend, Backend::Pod);
        assert_eq!(config.pod_root, PathBuf::from("/tmp/other-pod"));
    }

    #[test]
    #[serial]
    fn missing_explicit_file_errors() {
        let result = isolated().with_file("/definitely/not/here.toml").load();
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    #[serial]
    fn timeout_out_of_range_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "timeout_secs = 0\n").unwrap();
        let result = isolated().with_file(&file).load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn unsupported_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.ini");
        fs::write(&file, "backend=http").unwrap();
        let result = isolated().with_file(&file).load();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }
}
