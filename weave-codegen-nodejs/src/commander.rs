//! The commander.js view of a command tree.
//!
//! Shared by the JavaScript and TypeScript renderers. Each command becomes a
//! builder chain hung off its parent; leaves end in an `.action(...)` that
//! forwards to the hook.

use serde::Serialize;
use weave_codegen::{NamingConvention, TypeMapper, renderer::quote};
use weave_ir::{
    Argument, Cli, CliOption, CommandTree, Literal, ParameterSource, ParameterSpec, ValueType,
};

/// Variable holding the root `Command`.
pub const PROGRAM: &str = "program";

/// How identifiers and types are spelled for one target.
#[derive(Clone, Copy)]
pub struct Dialect<'a> {
    pub naming: &'a NamingConvention,
    pub types: &'a dyn TypeMapper,
    /// Annotate action parameters with their types.
    pub typed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommanderParam {
    /// Hook parameter name.
    pub ident: String,
    /// Property on commander's options object (options only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommanderCommand {
    pub name: String,
    pub path: Vec<String>,
    /// Variable the command is bound to.
    pub var: String,
    pub parent: String,
    /// Prefix of generated type names, e.g. `DbMigrate`.
    pub type_name: String,
    pub hook_fn: String,
    pub leaf: bool,
    /// Builder calls, one per line, starting with `.command(...)`.
    pub chain: Vec<String>,
    /// Hook parameters: arguments then options.
    pub params: Vec<CommanderParam>,
    /// Option properties, for an options interface.
    pub options: Vec<CommanderParam>,
    pub action_params: String,
    pub call_args: String,
}

/// Every command, depth-first.
pub fn commands(cli: &Cli, dialect: Dialect<'_>) -> Vec<CommanderCommand> {
    let mut out = Vec::new();
    for cmd in &cli.commands {
        collect(cmd, PROGRAM, dialect, &mut out);
    }
    out
}

/// `.addOption(...)` calls for the global options on the program.
pub fn global_chain(cli: &Cli) -> Vec<String> {
    cli.options.iter().map(add_option).collect()
}

/// Global option properties, for a `GlobalOptions` interface.
pub fn global_options(cli: &Cli, dialect: Dialect<'_>) -> Vec<CommanderParam> {
    cli.options
        .iter()
        .map(|opt| option_param(opt, dialect))
        .collect()
}

/// Names to import from `commander`.
pub fn imports(cli: &Cli) -> Vec<&'static str> {
    let all = cli.walk();
    let mut names = Vec::new();
    if all.iter().any(|cmd| !cmd.args.is_empty()) {
        names.push("Argument");
    }
    names.push("Command");
    if !cli.options.is_empty() || all.iter().any(|cmd| !cmd.options.is_empty()) {
        names.push("Option");
    }
    names
}

/// Import specifier for `to` as seen from `from`, both relative to the
/// project root. `.ts` sources are imported by their emitted `.js` name.
pub fn module_specifier(from: &str, to: &str) -> String {
    let from_dirs: Vec<&str> = from.split('/').collect();
    let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
    let to_parts: Vec<&str> = to.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dirs.len() - common;

    let mut spec = if ups == 0 {
        "./".to_string()
    } else {
        "../".repeat(ups)
    };
    spec.push_str(&to_parts[common..].join("/"));
    match spec.strip_suffix(".ts") {
        Some(stem) => format!("{stem}.js"),
        None => spec,
    }
}

fn var_name(cmd: &CommandTree, naming: &NamingConvention) -> String {
    format!("{}Cmd", (naming.command_to_function)(&cmd.path.join("-")))
}

fn collect(cmd: &CommandTree, parent: &str, dialect: Dialect<'_>, out: &mut Vec<CommanderCommand>) {
    let var = var_name(cmd, dialect.naming);
    let type_name = dialect.naming.type_name(&cmd.path.join("-"));

    let mut chain = vec![if cmd.hidden {
        format!(".command({}, {{ hidden: true }})", quote(&cmd.name))
    } else {
        format!(".command({})", quote(&cmd.name))
    }];
    if let Some(description) = &cmd.description {
        chain.push(format!(".description({})", quote(description)));
    }
    for alias in &cmd.aliases {
        chain.push(format!(".alias({})", quote(alias)));
    }
    chain.extend(cmd.args.iter().map(add_argument));
    chain.extend(cmd.options.iter().map(add_option));

    let args: Vec<CommanderParam> = cmd.args.iter().map(|a| arg_param(a, dialect)).collect();
    let options: Vec<CommanderParam> = cmd
        .options
        .iter()
        .map(|o| option_param(o, dialect))
        .collect();

    let mut action = Vec::new();
    for arg in &args {
        if dialect.typed {
            action.push(format!("{}: {}", arg.ident, arg.ty));
        } else {
            action.push(arg.ident.clone());
        }
    }
    if !options.is_empty() {
        if dialect.typed {
            action.push(format!("options: {}Options", type_name));
        } else {
            action.push("options".to_string());
        }
    }
    let call_args = args
        .iter()
        .map(|a| a.ident.clone())
        .chain(
            options
                .iter()
                .filter_map(|o| o.key.as_ref().map(|key| format!("options.{key}"))),
        )
        .collect::<Vec<_>>()
        .join(", ");

    let hook_fn = dialect.naming.function_name(&cmd.hook_name);
    if cmd.is_leaf() {
        chain.push(format!(
            ".action(async ({}) => {{ await hooks.{}({}); }})",
            action.join(", "),
            hook_fn,
            call_args
        ));
    }

    let mut params = args;
    params.extend(options.iter().cloned());

    out.push(CommanderCommand {
        name: cmd.name.clone(),
        path: cmd.path.clone(),
        var: var.clone(),
        parent: parent.to_string(),
        type_name,
        hook_fn,
        leaf: cmd.is_leaf(),
        chain,
        params,
        options,
        action_params: action.join(", "),
        call_args,
    });

    for child in &cmd.subcommands {
        collect(child, &var, dialect, out);
    }
}

fn hook_type(dialect: Dialect<'_>, ty: ValueType, required: bool, multiple: bool) -> String {
    let spec = ParameterSpec {
        name: String::new(),
        flag: String::new(),
        source: ParameterSource::Option,
        ty,
        required,
        multiple,
    };
    dialect.types.parameter_type(&spec)
}

fn arg_param(arg: &Argument, dialect: Dialect<'_>) -> CommanderParam {
    CommanderParam {
        ident: dialect.naming.field_name(&arg.name),
        key: None,
        ty: hook_type(
            dialect,
            arg.ty,
            arg.required || arg.default.is_some(),
            arg.multiple,
        ),
        description: arg.description.clone(),
    }
}

fn option_param(opt: &CliOption, dialect: Dialect<'_>) -> CommanderParam {
    CommanderParam {
        ident: dialect.naming.field_name(&opt.name),
        key: Some((dialect.naming.field_to_name)(&opt.name)),
        ty: hook_type(
            dialect,
            opt.ty,
            opt.required || opt.default.is_some(),
            opt.multiple,
        ),
        description: opt.description.clone(),
    }
}

/// A JavaScript expression for a manifest literal.
pub fn js_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => quote(s),
        Literal::Int(i) => i.to_string(),
        Literal::Float(f) => serde_json::Number::from_f64(*f)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Number.NaN".to_string()),
        Literal::Bool(b) => b.to_string(),
        Literal::List(items) => {
            let items: Vec<String> = items.iter().map(js_literal).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn parser(ty: ValueType, multiple: bool) -> Option<String> {
    let parse = match ty {
        ValueType::Int => "Number.parseInt(value, 10)",
        ValueType::Float => "Number.parseFloat(value)",
        _ => return None,
    };
    Some(if multiple {
        format!("(value, previous = []) => [...previous, {parse}]")
    } else {
        format!("(value) => {parse}")
    })
}

fn value_calls(
    ty: ValueType,
    multiple: bool,
    default: Option<&Literal>,
    choices: Option<&[String]>,
) -> String {
    let mut calls = String::new();
    if let Some(choices) = choices {
        let quoted: Vec<String> = choices.iter().map(|c| quote(c)).collect();
        calls.push_str(&format!(".choices([{}])", quoted.join(", ")));
    } else if let Some(parse) = parser(ty, multiple) {
        calls.push_str(&format!(".argParser({parse})"));
    }
    if let Some(default) = default {
        calls.push_str(&format!(".default({})", js_literal(default)));
    }
    calls
}

fn add_argument(arg: &Argument) -> String {
    let variadic = if arg.multiple { "..." } else { "" };
    let spec = if arg.required {
        format!("<{}{}>", arg.name, variadic)
    } else {
        format!("[{}{}]", arg.name, variadic)
    };
    let mut ctor = vec![quote(&spec)];
    if let Some(description) = &arg.description {
        ctor.push(quote(description));
    }
    format!(
        ".addArgument(new Argument({}){})",
        ctor.join(", "),
        value_calls(arg.ty, arg.multiple, arg.default.as_ref(), arg.choices.as_deref())
    )
}

fn add_option(opt: &CliOption) -> String {
    let mut flags = String::new();
    if let Some(short) = opt.short {
        flags.push_str(&format!("-{short}, "));
    }
    flags.push_str(&format!("--{}", opt.name));
    if !opt.is_flag() {
        let variadic = if opt.multiple { "..." } else { "" };
        flags.push_str(&format!(" <{}{}>", opt.name, variadic));
    }

    let mut ctor = vec![quote(&flags)];
    if let Some(description) = &opt.description {
        ctor.push(quote(description));
    }

    let mut calls = if opt.is_flag() {
        let default = opt.default.as_ref().map(js_literal);
        format!(".default({})", default.as_deref().unwrap_or("false"))
    } else {
        value_calls(opt.ty, opt.multiple, opt.default.as_ref(), opt.choices.as_deref())
    };
    if opt.required && !opt.is_flag() {
        calls.push_str(".makeOptionMandatory()");
    }
    format!(".addOption(new Option({}){})", ctor.join(", "), calls)
}
