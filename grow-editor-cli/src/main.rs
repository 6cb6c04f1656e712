//! grow-editor CLI - field-driven front matter editor for grow pods.
//!
//! Commands:
//! - `grow-editor show <pod_path>`: Show a document's fields and values
//! - `grow-editor partials [pod_path]`: List partial definitions
//! - `grow-editor edit <pod_path> --set key=value`: Set fields and save
//!
//! Environment variables:
//! - GROW_EDITOR_BACKEND: mock, http or pod
//! - GROW_EDITOR_BASE_URL: Editor server URL
//! - GROW_EDITOR_POD_ROOT: Pod directory
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use grow_editor_cli::{edit, load_config, partials, show, CliError};
use grow_editor_cli::{Cli, Commands};

/// Print an error and map the result to an exit code.
fn handle_result(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref(), cli.backend)?;
    let api = grow_editor_api::connect(&config)?;

    match cli.command {
        Commands::Show { pod_path, format } => show::run_show(api, &pod_path, format).await,
        Commands::Partials { pod_path, format } => {
            partials::run_partials(api, &pod_path, format).await
        }
        Commands::Edit {
            pod_path,
            assignments,
            locale,
        } => edit::run_edit(api, &pod_path, &assignments, locale.as_deref()).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("grow_editor=debug,grow_editor_api=debug,grow_editor_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(handle_result(run(cli).await));
}

#[cfg(test)]
mod tests {
    use super::*;
    use grow_editor_cli::{BackendArg, OutputFormat};

    #[test]
    fn test_cli_parsing_show_defaults_to_table() {
        let cli = Cli::parse_from(["grow-editor", "show", "/content/pages/home.yaml"]);
        assert!(matches!(
            cli.command,
            Commands::Show {
                format: OutputFormat::Table,
                ..
            }
        ));
        assert!(!cli.debug);
        assert!(cli.backend.is_none());
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "grow-editor",
            "partials",
            "--backend",
            "pod",
            "--debug",
            "--format",
            "yaml",
        ]);
        assert_eq!(cli.backend, Some(BackendArg::Pod));
        assert!(cli.debug);
        match cli.command {
            Commands::Partials { pod_path, format } => {
                assert_eq!(pod_path, "/");
                assert_eq!(format, OutputFormat::Yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_edit_collects_assignments() {
        let cli = Cli::parse_from([
            "grow-editor",
            "edit",
            "/content/pages/home.yaml",
            "--set",
            "$title=Blinkk Team",
            "--set",
            "meta.description=Cool",
            "--locale",
            "de",
        ]);
        match cli.command {
            Commands::Edit {
                assignments,
                locale,
                ..
            } => {
                assert_eq!(assignments, ["$title=Blinkk Team", "meta.description=Cool"]);
                assert_eq!(locale.as_deref(), Some("de"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_edit_requires_assignment() {
        assert!(Cli::try_parse_from(["grow-editor", "edit", "/a.yaml"]).is_err());
    }

    #[test]
    fn test_handle_result_exit_codes() {
        assert_eq!(handle_result(Ok(())), 0);
        assert_eq!(
            handle_result(Err(CliError::InvalidAssignment("x".into()))),
            1
        );
    }
}
