use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use weave_codegen::{ComponentKind, Filter, RenderContext, Renderer};
use weave_ir::IntermediateRepresentation;

use crate::{
    JS_NAMING, JsDocTypeMapper,
    commander::{self, Dialect},
};

const DEFAULT_CLI_PATH: &str = "cli.js";
const DEFAULT_HOOKS_PATH: &str = "hooks.js";

const DIALECT: Dialect<'static> = Dialect {
    naming: &JS_NAMING,
    types: &JsDocTypeMapper,
    typed: false,
};

/// Renders an ES module CLI built on commander.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeRenderer;

impl NodeRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct NodeView {
    commands: Vec<commander::CommanderCommand>,
    globals: Vec<String>,
    imports: Vec<&'static str>,
    /// Specifier the CLI uses to import the hooks module.
    hooks_import: String,
    cli_file: String,
    /// npm packages from the manifest, commander removed.
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

impl Renderer for NodeRenderer {
    fn language(&self) -> &str {
        "nodejs"
    }

    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str> {
        BTreeMap::from([
            (ComponentKind::Source, "js"),
            (ComponentKind::Manifest, "json"),
            (ComponentKind::Ignore, "gitignore"),
        ])
    }

    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext {
        let cli_file = cli_path(ir);
        let view = NodeView {
            commands: commander::commands(&ir.cli, DIALECT),
            globals: commander::global_chain(&ir.cli),
            imports: commander::imports(&ir.cli),
            hooks_import: commander::module_specifier(&cli_file, &hooks_path(ir)),
            packages: ir
                .dependencies_for("npm")
                .iter()
                .filter(|name| name.as_str() != "commander")
                .cloned()
                .collect(),
            cli_file,
        };
        RenderContext::from_ir(self.language(), ir).with("node", view)
    }

    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::from([("js_ident", js_ident as Filter)])
    }

    fn output_structure(&self, ir: &IntermediateRepresentation) -> IndexMap<String, String> {
        IndexMap::from([
            ("nodejs/cli".to_string(), cli_path(ir)),
            ("nodejs/hooks".to_string(), hooks_path(ir)),
            ("nodejs/package_json".to_string(), "package.json".to_string()),
            ("shared/gitignore".to_string(), ".gitignore".to_string()),
        ])
    }
}

fn js_ident(value: &str) -> String {
    JS_NAMING.field_name(value)
}
