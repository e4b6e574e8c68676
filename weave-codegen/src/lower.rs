//! Lowering: transforms a manifest into the intermediate representation.
//!
//! ```text
//! weave.toml → Manifest → build_ir → IntermediateRepresentation → Renderer
//! ```
//!
//! [`build_ir`] is a pure function of the manifest. It never mutates its
//! input and reads no clock. `cli.description` falls back to `cli.tagline`
//! and then the top-level `description`, and `cli.version` to the top-level
//! `version`. Beyond those, an optional field the manifest leaves unset stays
//! unset in the IR.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use weave_core::to_snake_case;
use weave_ir::{
    Argument, Cli, CliOption, CommandTree, DEPENDENCY_CATEGORIES, FeatureConfig,
    IntermediateRepresentation, Literal, Metadata, ParameterSource, ParameterSpec, Project,
    ValueType,
};
use weave_manifest::{ArgConfig, ArgType, CommandConfig, Manifest, OptionConfig};

use crate::{Error, Result, analyze};

/// Build the IR for `manifest`.
///
/// Fails with [`Error::Config`] when a command has an empty name, when two
/// commands map to the same hook, or when two parameters of one hook map to
/// the same identifier.
pub fn build_ir(manifest: &Manifest) -> Result<IntermediateRepresentation> {
    let cli = lower_cli(manifest)?;
    check_hook_names(&cli)?;
    let features = lower_features(manifest);
    let requirements = analyze::requirements(&cli, &features);

    Ok(IntermediateRepresentation {
        project: lower_project(manifest),
        cli,
        dependencies: lower_dependencies(manifest),
        features,
        requirements,
        metadata: Metadata {
            config_filename: manifest.source_name.clone(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Hook name for a command path: `["db", "migrate"]` → `on_db_migrate`.
pub fn hook_name(path: &[String]) -> String {
    format!("on_{}", to_snake_case(&path.join("_")))
}

/// Each hook becomes one function (and one type name) in generated code, so
/// `db migrate` and `db-migrate` cannot both exist.
fn check_hook_names(cli: &Cli) -> Result<()> {
    let mut seen: HashMap<&str, &[String]> = HashMap::new();
    for command in cli.walk() {
        if let Some(first) = seen.insert(&command.hook_name, &command.path) {
            return Err(Error::config(format!(
                "commands '{}' and '{}' both map to hook '{}'",
                first.join(" "),
                command.path.join(" "),
                command.hook_name
            )));
        }
    }
    Ok(())
}

fn lower_project(manifest: &Manifest) -> Project {
    Project {
        name: manifest.package_name.clone(),
        description: manifest.description.clone(),
        command_name: manifest.command_name.clone(),
        version: manifest.version.as_ref().map(ToString::to_string),
        package_name: Some(manifest.package_name.clone()),
        display_name: manifest.display_name.clone(),
        author: manifest.author.clone(),
        license: manifest.license.clone(),
        cli_path: manifest.cli_path.clone(),
        hooks_path: manifest.hooks_path.clone(),
    }
}

fn lower_cli(manifest: &Manifest) -> Result<Cli> {
    let Some(config) = &manifest.cli else {
        return Ok(Cli {
            name: manifest.cli_name().to_string(),
            description: manifest.description.clone(),
            version: manifest.version.as_ref().map(ToString::to_string),
            options: Vec::new(),
            commands: Vec::new(),
        });
    };

    Ok(Cli {
        name: manifest.cli_name().to_string(),
        description: config
            .description
            .clone()
            .or_else(|| config.tagline.clone())
            .or_else(|| manifest.description.clone()),
        version: config
            .version
            .clone()
            .or_else(|| manifest.version.as_ref().map(ToString::to_string)),
        options: config.options.iter().map(lower_option).collect(),
        commands: lower_commands(&config.commands, &[])?,
    })
}

fn lower_commands(
    commands: &IndexMap<String, CommandConfig>,
    parent: &[String],
) -> Result<Vec<CommandTree>> {
    commands
        .iter()
        .map(|(name, command)| lower_command(name, command, parent))
        .collect()
}

fn lower_command(name: &str, command: &CommandConfig, parent: &[String]) -> Result<CommandTree> {
    if name.trim().is_empty() {
        let location = if parent.is_empty() {
            "at the top level".to_string()
        } else {
            format!("under '{}'", parent.join(" "))
        };
        return Err(Error::config(format!("empty command name {}", location)));
    }

    let mut path = parent.to_vec();
    path.push(name.to_string());

    let args: Vec<Argument> = command.args.iter().map(lower_arg).collect();
    let options: Vec<CliOption> = command.options.iter().map(lower_option).collect();
    let parameters = parameters(&path, &args, &options)?;
    let subcommands = lower_commands(&command.subcommands, &path)?;

    Ok(CommandTree {
        name: name.to_string(),
        hook_name: hook_name(&path),
        path,
        description: command.description.clone(),
        args,
        options,
        subcommands,
        parameters,
        aliases: command.aliases.clone(),
        hidden: command.hidden,
    })
}

/// Hook parameters: arguments first, then options, each under its
/// snake_case identifier.
fn parameters(
    path: &[String],
    args: &[Argument],
    options: &[CliOption],
) -> Result<Vec<ParameterSpec>> {
    let from_args = args.iter().map(|arg| ParameterSpec {
        name: to_snake_case(&arg.name),
        flag: arg.name.clone(),
        source: ParameterSource::Argument,
        ty: arg.ty,
        required: arg.required,
        multiple: arg.multiple,
    });
    let from_options = options.iter().map(|opt| ParameterSpec {
        name: to_snake_case(&opt.name),
        flag: opt.name.clone(),
        source: ParameterSource::Option,
        ty: opt.ty,
        required: opt.required,
        multiple: opt.multiple,
    });

    let mut seen = HashSet::new();
    let mut specs = Vec::new();
    for spec in from_args.chain(from_options) {
        if !seen.insert(spec.name.clone()) {
            return Err(Error::config(format!(
                "command '{}' has more than one parameter named '{}'",
                path.join(" "),
                spec.name
            )));
        }
        specs.push(spec);
    }
    Ok(specs)
}

fn lower_arg(arg: &ArgConfig) -> Argument {
    Argument {
        name: arg.name.clone(),
        description: arg.description.clone(),
        ty: lower_type(arg.arg_type),
        required: arg.required,
        multiple: arg.is_variadic(),
        nargs: arg.nargs.as_ref().map(ToString::to_string),
        default: arg.default.as_ref().and_then(lower_literal),
        choices: arg.choices.clone(),
    }
}

fn lower_option(opt: &OptionConfig) -> CliOption {
    CliOption {
        name: opt.name.clone(),
        short: opt.short,
        description: opt.description.clone(),
        ty: lower_type(opt.option_type),
        required: opt.required,
        multiple: opt.multiple,
        default: opt.default.as_ref().and_then(lower_literal),
        choices: opt.choices.clone(),
    }
}

fn lower_type(ty: ArgType) -> ValueType {
    match ty {
        ArgType::String => ValueType::String,
        ArgType::Int => ValueType::Int,
        ArgType::Float => ValueType::Float,
        ArgType::Bool => ValueType::Bool,
        ArgType::Path => ValueType::Path,
    }
}

/// TOML scalars and arrays become literals; tables and datetimes have no
/// literal form and are dropped.
fn lower_literal(value: &toml::Value) -> Option<Literal> {
    match value {
        toml::Value::String(s) => Some(Literal::String(s.clone())),
        toml::Value::Integer(i) => Some(Literal::Int(*i)),
        toml::Value::Float(f) => Some(Literal::Float(*f)),
        toml::Value::Boolean(b) => Some(Literal::Bool(*b)),
        toml::Value::Array(items) => Some(Literal::List(
            items.iter().filter_map(lower_literal).collect(),
        )),
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}

fn lower_features(manifest: &Manifest) -> BTreeMap<String, FeatureConfig> {
    manifest
        .features
        .iter()
        .map(|(name, table)| {
            let settings = table
                .settings
                .iter()
                .filter_map(|(key, value)| lower_literal(value).map(|lit| (key.clone(), lit)))
                .collect();
            (
                name.clone(),
                FeatureConfig {
                    enabled: table.enabled,
                    settings,
                },
            )
        })
        .collect()
}

/// Every category present, each list de-duplicated in first-seen order.
fn lower_dependencies(manifest: &Manifest) -> BTreeMap<String, Vec<String>> {
    let mut deps: BTreeMap<String, Vec<String>> = DEPENDENCY_CATEGORIES
        .iter()
        .map(|category| (category.to_string(), Vec::new()))
        .collect();

    let mut add = |category: &str, name: &str| {
        let list = deps.entry(category.to_string()).or_default();
        if !name.is_empty() && !list.iter().any(|existing| existing == name) {
            list.push(name.to_string());
        }
    };

    for dependency in manifest.dependencies.iter() {
        add(dependency.kind().category(), dependency.name());
    }
    if let Some(installation) = &manifest.installation {
        for (category, names) in installation.extras.by_category() {
            for name in names {
                add(category, name);
            }
        }
    }
    for name in manifest.rust_crates.keys() {
        add("rust", name);
    }

    deps
}
