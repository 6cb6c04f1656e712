//! Field-driven front matter editing
//!
//! Builds an in-memory form from a document's field metadata:
//!
//! - [`FrontMatter`] navigates and edits a front-matter tree by dotted path
//! - [`FieldWidget`] holds one editable value, built by [`field_generator`]
//! - [`PartialContainer`] groups the widgets of one partial instance
//! - [`Partials`] fetches a pod's partial definitions once and shares them
//! - [`DocumentEditor`] loads, edits and saves a whole document
//!
//! All I/O goes through an [`EditorApi`](grow_editor_api::EditorApi).

pub mod editor;
pub mod error;
pub mod field;
pub mod front_matter;
pub mod partial;
pub mod partials;

pub use editor::DocumentEditor;
pub use error::{EditorError, Result};
pub use field::{field_generator, FieldWidget, PartialItem, PartialsField, TextField};
pub use front_matter::{lookup, FrontMatter};
pub use partial::PartialContainer;
pub use partials::Partials;
