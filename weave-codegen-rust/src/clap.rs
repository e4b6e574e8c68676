//! The clap-derive view of a command tree.
//!
//! Templates get one [`ClapCommand`] per command, depth-first, with every
//! Rust identifier, type and attribute already spelled out.

use serde::Serialize;
use weave_codegen::TypeMapper;
use weave_core::to_snake_case;
use weave_ir::{
    Argument, Cli, CliOption, CommandTree, Literal, ParameterSource, ParameterSpec, ValueType,
};

use crate::{RUST_NAMING, RustTypeMapper};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClapCommand {
    pub name: String,
    pub path: Vec<String>,
    /// Prefix of the generated `<type_name>Args` / `<type_name>Command` type.
    pub type_name: String,
    /// Dispatch function of a group, `run_<path>`.
    pub run_fn: String,
    pub hook_name: String,
    pub leaf: bool,
    pub fields: Vec<ClapField>,
    pub children: Vec<ClapVariant>,
}

/// A subcommand as a variant of its parent's enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClapVariant {
    pub variant: String,
    pub type_name: String,
    pub run_fn: String,
    pub hook_name: String,
    pub leaf: bool,
    /// `#[command(...)]` lines.
    pub attrs: Vec<String>,
    /// Hook call arguments, e.g. `args.name, args.count`.
    pub call_args: String,
    /// Whether the variant's args are read at all.
    pub binds_args: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClapField {
    pub ident: String,
    pub ty: String,
    /// `#[arg(...)]` lines.
    pub attrs: Vec<String>,
}

/// Top-level variants plus every command, depth-first.
pub fn commands(cli: &Cli) -> (Vec<ClapVariant>, Vec<ClapCommand>) {
    let root = cli.commands.iter().map(variant).collect();
    let all = cli.walk().into_iter().map(command).collect();
    (root, all)
}

/// Fields for the global options on the root parser.
pub fn global_fields(cli: &Cli) -> Vec<ClapField> {
    cli.options
        .iter()
        .map(|opt| {
            let mut field = option_field(opt);
            if let Some(attr) = field.attrs.first_mut() {
                attr.insert_str(attr.len() - 2, ", global = true");
            }
            field
        })
        .collect()
}

fn type_name(cmd: &CommandTree) -> String {
    RUST_NAMING.type_name(&cmd.path.join("-"))
}

fn run_fn(cmd: &CommandTree) -> String {
    format!("run_{}", to_snake_case(&cmd.path.join("_")))
}

fn command(cmd: &CommandTree) -> ClapCommand {
    let mut fields: Vec<ClapField> = cmd.args.iter().map(arg_field).collect();
    fields.extend(cmd.options.iter().map(option_field));

    ClapCommand {
        name: cmd.name.clone(),
        path: cmd.path.clone(),
        type_name: type_name(cmd),
        run_fn: run_fn(cmd),
        hook_name: cmd.hook_name.clone(),
        leaf: cmd.is_leaf(),
        fields,
        children: cmd.subcommands.iter().map(variant).collect(),
    }
}

fn variant(cmd: &CommandTree) -> ClapVariant {
    let mut parts = vec![format!("name = {:?}", cmd.name)];
    if let Some(about) = &cmd.description {
        parts.push(format!("about = {:?}", about));
    }
    for alias in &cmd.aliases {
        parts.push(format!("visible_alias = {:?}", alias));
    }
    if cmd.hidden {
        parts.push("hide = true".to_string());
    }

    let idents: Vec<String> = cmd
        .parameters
        .iter()
        .map(|p| format!("args.{}", RUST_NAMING.field_name(&p.flag)))
        .collect();

    ClapVariant {
        variant: RUST_NAMING.type_name(&cmd.name),
        type_name: type_name(cmd),
        run_fn: run_fn(cmd),
        hook_name: cmd.hook_name.clone(),
        leaf: cmd.is_leaf(),
        attrs: vec![format!("#[command({})]", parts.join(", "))],
        binds_args: !idents.is_empty(),
        call_args: idents.join(", "),
    }
}

fn field_type(ty: ValueType, required: bool, multiple: bool, has_default: bool) -> String {
    let spec = ParameterSpec {
        name: String::new(),
        flag: String::new(),
        source: ParameterSource::Option,
        ty,
        required: required || has_default,
        multiple,
    };
    RustTypeMapper.parameter_type(&spec)
}

fn arg_field(arg: &Argument) -> ClapField {
    let mut parts = vec![format!("value_name = {:?}", arg.name.to_uppercase())];
    if let Some(help) = &arg.description {
        parts.push(format!("help = {:?}", help));
    }
    if arg.multiple && arg.required {
        parts.push("num_args = 1..".to_string());
    }
    push_value_parts(&mut parts, arg.default.as_ref(), arg.choices.as_deref());

    ClapField {
        ident: RUST_NAMING.field_name(&arg.name),
        ty: field_type(arg.ty, arg.required, arg.multiple, arg.default.is_some()),
        attrs: vec![format!("#[arg({})]", parts.join(", "))],
    }
}

fn option_field(opt: &CliOption) -> ClapField {
    let mut parts = vec![format!("long = {:?}", opt.name)];
    if let Some(short) = opt.short {
        parts.push(format!("short = {:?}", short));
    }
    if let Some(help) = &opt.description {
        parts.push(format!("help = {:?}", help));
    }
    if opt.required && !opt.is_flag() {
        parts.push("required = true".to_string());
    }
    if !opt.is_flag() {
        push_value_parts(&mut parts, opt.default.as_ref(), opt.choices.as_deref());
    }

    ClapField {
        ident: RUST_NAMING.field_name(&opt.name),
        ty: field_type(opt.ty, opt.required, opt.multiple, opt.default.is_some()),
        attrs: vec![format!("#[arg({})]", parts.join(", "))],
    }
}

fn push_value_parts(
    parts: &mut Vec<String>,
    default: Option<&Literal>,
    choices: Option<&[String]>,
) {
    if let Some(default) = default {
        parts.push(format!("default_value = {:?}", default.to_code_string()));
    }
    if let Some(choices) = choices {
        let quoted: Vec<String> = choices.iter().map(|c| format!("{:?}", c)).collect();
        parts.push(format!("value_parser = [{}]", quoted.join(", ")));
    }
}
