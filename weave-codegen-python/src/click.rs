//! The click view of a command tree.
//!
//! Every command becomes a decorated function. Decorators are rendered here
//! so the templates only lay them out.

use serde::Serialize;
use weave_codegen::{TypeMapper, renderer::quote};
use weave_core::to_snake_case;
use weave_ir::{
    Argument, Cli, CliOption, CommandTree, Literal, ParameterSource, ParameterSpec, ValueType,
};

use crate::{PYTHON_NAMING, PythonTypeMapper};

/// Name of the root group function.
pub const ROOT_FUNCTION: &str = "main";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickCommand {
    pub name: String,
    pub path: Vec<String>,
    /// Function the command is registered on (`main` for top-level commands).
    pub parent: String,
    pub function: String,
    pub hook_name: String,
    pub leaf: bool,
    /// `@<parent>.command(...)` / `@<parent>.group(...)`.
    pub registration: String,
    pub decorators: Vec<String>,
    /// Python parameter names, in hook order.
    pub params: Vec<String>,
    /// Hook parameters with annotations, e.g. `name: str, times: int`.
    pub signature: String,
    /// Keyword arguments for the hook call, e.g. `name=name, times=times`.
    pub call_args: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

/// Every command, depth-first.
pub fn commands(cli: &Cli) -> Vec<ClickCommand> {
    let mut out = Vec::new();
    for cmd in &cli.commands {
        collect(cmd, ROOT_FUNCTION, &mut out);
    }
    out
}

/// Decorators for the global options on the root group.
pub fn global_decorators(cli: &Cli) -> Vec<String> {
    cli.options.iter().map(option_decorator).collect()
}

/// Python names of the global options.
pub fn global_params(cli: &Cli) -> Vec<String> {
    cli.options
        .iter()
        .map(|opt| PYTHON_NAMING.field_name(&opt.name))
        .collect()
}

fn function_name(cmd: &CommandTree) -> String {
    format!("cmd_{}", to_snake_case(&cmd.path.join("_")))
}

fn collect(cmd: &CommandTree, parent: &str, out: &mut Vec<ClickCommand>) {
    let function = function_name(cmd);
    let kind = if cmd.is_leaf() { "command" } else { "group" };

    let mut registration = vec![quote(&cmd.name)];
    if !cmd.aliases.is_empty() {
        // click has no aliases; keep them visible in help instead.
        registration.push(format!(
            "short_help={}",
            quote(&format!(
                "{} (aliases: {})",
                cmd.description.as_deref().unwrap_or_default(),
                cmd.aliases.join(", ")
            ))
        ));
    }
    if cmd.hidden {
        registration.push("hidden=True".to_string());
    }

    let mut decorators: Vec<String> = cmd.args.iter().map(argument_decorator).collect();
    decorators.extend(cmd.options.iter().map(option_decorator));

    let typed: Vec<(String, String)> = cmd
        .args
        .iter()
        .map(|a| (&a.name, a.ty, a.required, a.multiple, a.default.is_some()))
        .chain(
            cmd.options
                .iter()
                .map(|o| (&o.name, o.ty, o.required, o.multiple, o.default.is_some())),
        )
        .map(|(name, ty, required, multiple, has_default)| {
            (
                PYTHON_NAMING.field_name(name),
                annotation(ty, required || has_default, multiple),
            )
        })
        .collect();
    let signature = typed
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ");
    let params: Vec<String> = typed.into_iter().map(|(name, _)| name).collect();
    let call_args = params
        .iter()
        .map(|name| format!("{name}={name}"))
        .collect::<Vec<_>>()
        .join(", ");

    out.push(ClickCommand {
        name: cmd.name.clone(),
        path: cmd.path.clone(),
        parent: parent.to_string(),
        registration: format!("@{}.{}({})", parent, kind, registration.join(", ")),
        function: function.clone(),
        hook_name: cmd.hook_name.clone(),
        leaf: cmd.is_leaf(),
        decorators,
        params,
        signature,
        call_args,
        docstring: cmd.description.clone(),
    });

    for child in &cmd.subcommands {
        collect(child, &function, out);
    }
}

fn annotation(ty: ValueType, required: bool, multiple: bool) -> String {
    let spec = ParameterSpec {
        name: String::new(),
        flag: String::new(),
        source: ParameterSource::Option,
        ty,
        required,
        multiple,
    };
    PythonTypeMapper.parameter_type(&spec)
}

fn click_type(ty: ValueType, choices: Option<&[String]>) -> Option<String> {
    if let Some(choices) = choices {
        let quoted: Vec<String> = choices.iter().map(|c| quote(c)).collect();
        return Some(format!("click.Choice([{}])", quoted.join(", ")));
    }
    match ty {
        ValueType::String | ValueType::Bool => None,
        ValueType::Int => Some("int".to_string()),
        ValueType::Float => Some("float".to_string()),
        ValueType::Path => Some("click.Path(path_type=pathlib.Path)".to_string()),
    }
}

/// A Python expression for a manifest literal.
pub fn python_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => quote(s),
        Literal::Int(i) => i.to_string(),
        Literal::Float(f) => format!("{:?}", f),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::List(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn argument_decorator(arg: &Argument) -> String {
    let mut parts = vec![
        quote(&PYTHON_NAMING.field_name(&arg.name)),
        format!("metavar={}", quote(&arg.name.to_uppercase())),
    ];
    if arg.multiple {
        parts.push("nargs=-1".to_string());
        if arg.required {
            parts.push("required=True".to_string());
        }
    } else if !arg.required {
        parts.push("required=False".to_string());
    }
    if let Some(ty) = click_type(arg.ty, arg.choices.as_deref()) {
        parts.push(format!("type={}", ty));
    } else if arg.ty == ValueType::Bool {
        parts.push("type=bool".to_string());
    }
    if let Some(default) = &arg.default {
        parts.push(format!("default={}", python_literal(default)));
    }
    format!("@click.argument({})", parts.join(", "))
}

fn option_decorator(opt: &CliOption) -> String {
    let mut parts = Vec::new();
    if let Some(short) = opt.short {
        parts.push(quote(&format!("-{}", short)));
    }
    parts.push(quote(&format!("--{}", opt.name)));
    parts.push(quote(&PYTHON_NAMING.field_name(&opt.name)));

    if opt.is_flag() {
        parts.push("is_flag=True".to_string());
    } else if let Some(ty) = click_type(opt.ty, opt.choices.as_deref()) {
        parts.push(format!("type={}", ty));
    }
    if opt.multiple {
        parts.push("multiple=True".to_string());
    }
    if opt.required && !opt.is_flag() {
        parts.push("required=True".to_string());
    }
    if let Some(default) = &opt.default {
        parts.push(format!("default={}", python_literal(default)));
        parts.push("show_default=True".to_string());
    }
    if let Some(help) = &opt.description {
        parts.push(format!("help={}", quote(help)));
    }
    format!("@click.option({})", parts.join(", "))
}
