//! Configuration loader for weave.toml.
//!
//! Parses a manifest into typed structs and rejects structurally broken input
//! with [`miette`] diagnostics. Everything downstream (IR building, rendering)
//! receives an already-checked [`Manifest`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod cli;
mod dependencies;
mod error;
mod manifest;
mod validate;

use std::path::Path;

pub use cli::{ArgConfig, ArgType, CliConfig, CommandConfig, Nargs, OptionConfig};
pub use dependencies::{
    DependenciesConfig, Dependency, DependencyKind, Extras, InstallationConfig,
};
pub use error::{Error, Result, SourceContext};
pub use manifest::{FeatureTable, Manifest};

/// Default manifest filename.
pub const MANIFEST_FILENAME: &str = "weave.toml";

/// Parse a manifest file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_str_with_filename(&content, &filename)
}

/// Parse a manifest from a string (uses "weave.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Manifest> {
    parse_str_with_filename(content, MANIFEST_FILENAME)
}

/// Parse a manifest from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let mut manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    validate::validate_manifest(&manifest, &ctx)?;
    manifest.source_name = Some(filename.to_string());
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_sets_source_name() {
        let manifest = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"
            "#,
        )
        .unwrap();
        assert_eq!(manifest.source_name.as_deref(), Some("weave.toml"));
    }

    #[test]
    fn test_parse_error_is_spanned() {
        let err = parse_str("package_name = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_str(r#"package_name = "hello-cli""#).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_command_name() {
        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"

            [cli.commands."say hi"]
            desc = "Greets"
            "#,
        )
        .unwrap_err();

        match *err {
            Error::InvalidIdentifier { name, context, .. } => {
                assert_eq!(name, "say hi");
                assert_eq!(context, "command");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_short_flag_with_global_option() {
        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"

            [[cli.options]]
            name = "verbose"
            short = "v"
            type = "bool"

            [cli.commands.build]
            [[cli.commands.build.options]]
            name = "version-file"
            short = "v"
            "#,
        )
        .unwrap_err();

        match *err {
            Error::DuplicateShortFlag {
                short,
                first_flag,
                second_flag,
                ..
            } => {
                assert_eq!(short, 'v');
                assert_eq!(first_flag, "verbose");
                assert_eq!(second_flag, "version-file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_command_name_rejected() {
        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = " "
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_output_path_outside_root_rejected() {
        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"
            cli_path = "../elsewhere/cli.py"
            "#,
        )
        .unwrap_err();
        match *err {
            Error::Validation { message, span, .. } => {
                assert!(message.contains("cli_path"));
                assert!(message.contains(".."));
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"
            hooks_path = "/etc/cron.d/hooks"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_cli_and_hooks_paths_must_differ() {
        let err = parse_str(
            r#"
            package_name = "hello-cli"
            command_name = "hello"
            cli_path = "src/app.py"
            hooks_path = "src/app.py"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both point at"));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/weave.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
