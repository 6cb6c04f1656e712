//! CLI definition for the grow-editor command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Edit the front matter of grow pod documents through their field metadata.
///
/// The backend defaults to fixed sample data. Point it at a running editor
/// server with `--backend http` or at a pod directory with `--backend pod`.
#[derive(Parser, Debug)]
#[command(name = "grow-editor")]
#[command(version)]
#[command(about = "Field-driven front matter editor for grow pods")]
#[command(
    long_about = "Loads a document's field metadata and front matter, binds a widget to each \
    field, and saves edited values back.\n\n\
    Configuration is read from ~/.grow-editor/config.{toml,yaml,json}, then \
    ./.grow-editor/config.*, then --config.\n\n\
    Environment variables:\n  \
    GROW_EDITOR_BACKEND   mock, http or pod\n  \
    GROW_EDITOR_BASE_URL  Editor server URL (http backend)\n  \
    GROW_EDITOR_POD_ROOT  Pod directory (pod backend)"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file layered over the discovered ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a document's fields and their current values
    Show {
        /// Pod path of the document, e.g. /content/pages/home.yaml
        pod_path: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the partial definitions available to a document
    Partials {
        /// Pod path of the document
        #[arg(default_value = "/")]
        pod_path: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Set field values and save the document
    Edit {
        /// Pod path of the document
        pod_path: String,
        /// Assignment of the form key=value; the value is parsed as YAML
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
        /// Locale to save under (defaults to the document's default locale)
        #[arg(long)]
        locale: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Mock,
    Http,
    Pod,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}
