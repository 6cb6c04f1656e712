//! Field metadata and partial definitions
//!
//! `grow-editor-fields` is the schema-only layer of the editor. It describes
//! which values a document exposes for editing and which reusable partials a
//! pod provides. It knows nothing about widgets or transport.
//!
//! # Architecture
//!
//! - **Field metadata**: `type`, dotted `key` into front matter, display `label`
//! - **Partial definitions**: ordered map of partial key to label and fields
//! - **YAML on disk**: one `<key>.yaml` file per partial under a pod's `partials/`
//! - **Default seeding**: `with_defaults()` writes missing definitions, preserves edits

pub mod error;
pub mod registry;
pub mod types;

pub use error::{FieldsError, Result};
pub use registry::{atomic_write, PartialDefaults, PartialRegistry, PartialRegistryBuilder};
pub use types::{FieldMeta, FieldType, PartialDef, PartialDefinitions};
