use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use weave_codegen::{ComponentKind, Filter, RenderContext, Renderer, TypeMapper};
use weave_codegen_nodejs::commander::{self, CommanderCommand, CommanderParam, Dialect};
use weave_ir::{IntermediateRepresentation, ValueType};

use crate::{TS_NAMING, TypeScriptTypeMapper};

const DEFAULT_CLI_PATH: &str = "src/cli.ts";
const DEFAULT_HOOKS_PATH: &str = "src/hooks.ts";
const TYPES_PATH: &str = "src/types.ts";

const DIALECT: Dialect<'static> = Dialect {
    naming: &TS_NAMING,
    types: &TypeScriptTypeMapper,
    typed: true,
};

/// Renders a commander CLI in TypeScript, compiled with `tsc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer;

impl TypeScriptRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct TsView {
    commands: Vec<CommanderCommand>,
    globals: Vec<String>,
    global_options: Vec<CommanderParam>,
    imports: Vec<&'static str>,
    /// Option interfaces the CLI annotates actions with.
    type_imports: Vec<String>,
    hooks_import: String,
    types_import: String,
    /// Compiled entry point, e.g. `dist/cli.js`.
    bin: String,
    packages: Vec<String>,
}

fn cli_path(ir: &IntermediateRepresentation) -> String {
    ir.project
        .cli_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CLI_PATH.to_string())
}

fn hooks_path(ir: &IntermediateRepresentation) -> String {
    ir.project
        .hooks_path
        .clone()
        .unwrap_or_else(|| DEFAULT_HOOKS_PATH.to_string())
}

/// Where `tsc` emits a source under `src/`.
pub fn compiled_path(source: &str) -> String {
    let relative = source.strip_prefix("src/").unwrap_or(source);
    let stem = relative.strip_suffix(".ts").unwrap_or(relative);
    format!("dist/{stem}.js")
}

impl Renderer for TypeScriptRenderer {
    fn language(&self) -> &str {
        "typescript"
    }

    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str> {
        BTreeMap::from([
            (ComponentKind::Source, "ts"),
            (ComponentKind::Types, "ts"),
            (ComponentKind::Manifest, "json"),
            (ComponentKind::Config, "json"),
            (ComponentKind::Ignore, "gitignore"),
        ])
    }

    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext {
        let cli_file = cli_path(ir);
        let commands = commander::commands(&ir.cli, DIALECT);
        let type_imports = commands
            .iter()
            .filter(|cmd| cmd.leaf && !cmd.options.is_empty())
            .map(|cmd| format!("{}Options", cmd.type_name))
            .collect();

        let view = TsView {
            globals: commander::global_chain(&ir.cli),
            global_options: commander::global_options(&ir.cli, DIALECT),
            imports: commander::imports(&ir.cli),
            type_imports,
            hooks_import: commander::module_specifier(&cli_file, &hooks_path(ir)),
            types_import: commander::module_specifier(&cli_file, TYPES_PATH),
            bin: compiled_path(&cli_file),
            packages: ir
                .dependencies_for("npm")
                .iter()
                .filter(|name| name.as_str() != "commander")
                .cloned()
                .collect(),
            commands,
        };
        RenderContext::from_ir(self.language(), ir).with("ts", view)
    }

    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::from([
            ("ts_ident", ts_ident as Filter),
            ("ts_type_name", ts_type_name as Filter),
            ("ts_type", ts_type as Filter),
        ])
    }

    fn output_structure(&self, ir: &IntermediateRepresentation) -> IndexMap<String, String> {
        IndexMap::from([
            ("typescript/cli".to_string(), cli_path(ir)),
            ("typescript/hooks".to_string(), hooks_path(ir)),
            ("typescript/types".to_string(), TYPES_PATH.to_string()),
            ("typescript/package_json".to_string(), "package.json".to_string()),
            ("typescript/tsconfig".to_string(), "tsconfig.json".to_string()),
            ("shared/gitignore".to_string(), ".gitignore".to_string()),
        ])
    }
}

fn ts_ident(value: &str) -> String {
    TS_NAMING.field_name(value)
}

fn ts_type_name(value: &str) -> String {
    TS_NAMING.type_name(value)
}

fn ts_type(value: &str) -> String {
    match ValueType::from_name(value) {
        Some(ty) => TypeScriptTypeMapper.map_type(ty).to_string(),
        None => value.to_string(),
    }
}
