//! Editor API client for grow pods
//!
//! The editor talks to a pod through the [`EditorApi`] trait: fetch a
//! document with its field metadata, fetch the pod's partial definitions, and
//! save edited front matter. Three backends implement it:
//!
//! - [`MockEditorApi`] answers every call with fixed sample data
//! - [`HttpEditorApi`] talks to a running editor server over HTTP
//! - [`PodEditorApi`] reads and writes a pod directory on the local filesystem
//!
//! [`EditorConfig`] selects and parameterizes a backend; [`connect`] builds it.

pub mod client;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod http;
pub mod logging;
pub mod mock;
pub mod pod;
pub mod types;

pub use client::{connect, EditorApi};
pub use config::{Backend, ConfigError, ConfigLoader, ConfigResult, EditorConfig};
pub use error::{ApiError, Result};
pub use http::{HttpEditorApi, CONTENT_ENDPOINT, PARTIALS_ENDPOINT};
pub use logging::Pretty;
pub use mock::MockEditorApi;
pub use pod::PodEditorApi;
pub use types::{Document, FrontMatterMap, PartialsResponse, SaveRequest, SavedDocument};
