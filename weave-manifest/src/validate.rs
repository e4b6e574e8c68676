//! Structural checks run after parsing.
//!
//! These only reject manifests no renderer could turn into a working CLI.
//! Anything finer grained belongs to the renderers.

use std::{
    collections::HashMap,
    path::{Component, Path},
};

use indexmap::IndexMap;

use crate::{CommandConfig, Manifest, OptionConfig, Result, SourceContext};

/// Returns the reason a name is not a usable command or parameter name.
pub(crate) fn invalid_name_reason(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if !c.is_ascii_alphabetic() => return Some("name must start with a letter"),
        Some(_) => {}
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_')) {
        return Some("name contains characters other than letters, digits, '-' and '_'");
    }
    None
}

pub(crate) fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if manifest.package_name.trim().is_empty() {
        return Err(ctx.validation_error("package_name cannot be empty", Some("package_name")));
    }
    if manifest.command_name.trim().is_empty() {
        return Err(ctx.validation_error("command_name cannot be empty", Some("command_name")));
    }

    check_output_paths(manifest, ctx)?;

    let Some(cli) = &manifest.cli else {
        return Ok(());
    };

    check_short_flags(manifest.cli_name(), &cli.options, &[], ctx)?;
    validate_commands(&cli.commands, &cli.options, &[], ctx)
}

fn validate_commands(
    commands: &IndexMap<String, CommandConfig>,
    global_options: &[OptionConfig],
    parent: &[&str],
    ctx: &SourceContext,
) -> Result<()> {
    for (name, command) in commands {
        if let Some(reason) = invalid_name_reason(name) {
            return Err(ctx.invalid_identifier_error(name, "command", reason));
        }

        let mut path = parent.to_vec();
        path.push(name);
        let display = path.join(" ");

        for arg in &command.args {
            if let Some(reason) = invalid_name_reason(&arg.name) {
                return Err(ctx.invalid_identifier_error(&arg.name, "argument", reason));
            }
        }
        for option in &command.options {
            if let Some(reason) = invalid_name_reason(&option.name) {
                return Err(ctx.invalid_identifier_error(&option.name, "option", reason));
            }
        }

        check_short_flags(&display, &command.options, global_options, ctx)?;
        validate_commands(&command.subcommands, global_options, &path, ctx)?;
    }
    Ok(())
}

/// Returns the reason a path override would land outside the output root.
pub(crate) fn escaping_path_reason(path: &str) -> Option<&'static str> {
    if path.trim().is_empty() {
        return Some("path cannot be empty");
    }
    let path = Path::new(path);
    if path.is_absolute() {
        return Some("path must be relative to the output directory");
    }
    for component in path.components() {
        match component {
            Component::ParentDir => return Some("path cannot contain '..'"),
            Component::RootDir | Component::Prefix(_) => {
                return Some("path must be relative to the output directory");
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    None
}

/// `cli_path` and `hooks_path` stay inside the output root and name different files.
fn check_output_paths(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let fields = [
        ("cli_path", manifest.cli_path.as_deref()),
        ("hooks_path", manifest.hooks_path.as_deref()),
    ];
    for (field, value) in fields {
        let Some(value) = value else { continue };
        if let Some(reason) = escaping_path_reason(value) {
            return Err(ctx.validation_error(format!("{field} '{value}': {reason}"), Some(value)));
        }
    }
    match (&manifest.cli_path, &manifest.hooks_path) {
        (Some(cli), Some(hooks)) if Path::new(cli) == Path::new(hooks) => {
            Err(ctx.validation_error(
                format!("cli_path and hooks_path both point at '{cli}'"),
                Some("hooks_path"),
            ))
        }
        _ => Ok(()),
    }
}

/// Short flags must be unique among a command's own options and the global ones.
fn check_short_flags(
    command: &str,
    options: &[OptionConfig],
    global_options: &[OptionConfig],
    ctx: &SourceContext,
) -> Result<()> {
    let mut seen: HashMap<char, &str> = HashMap::new();
    for option in global_options.iter().chain(options) {
        let Some(short) = option.short else { continue };
        if let Some(first) = seen.insert(short, &option.name) {
            return Err(ctx.duplicate_short_flag_error(short, command, first, &option.name));
        }
    }
    Ok(())
}
