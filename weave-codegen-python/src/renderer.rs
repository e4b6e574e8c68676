use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use weave_codegen::{ComponentKind, Filter, RenderContext, Renderer, TypeMapper};
use weave_ir::{IntermediateRepresentation, ValueType};

use crate::{PYTHON_NAMING, PythonTypeMapper, click};

/// Placeholder allowed in `cli_path` / `hooks_path` overrides.
const PACKAGE_PLACEHOLDER: &str = "{package_name}";

/// Renders a click application packaged with a `pyproject.toml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonRenderer;

impl PythonRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct PythonView {
    /// Importable package name.
    package: String,
    commands: Vec<click::ClickCommand>,
    globals: Vec<String>,
    global_params: Vec<String>,
    /// Dotted module of the entry point, e.g. `greeter.cli`.
    entry_module: String,
    hooks_module: String,
    requirements: Vec<String>,
    uses_pathlib: bool,
}

/// `my-tool` becomes `my_tool`.
pub fn package_name(ir: &IntermediateRepresentation) -> String {
    ir.project
        .package_name
        .as_deref()
        .unwrap_or(&ir.project.name)
        .replace('-', "_")
}

fn resolve_path(custom: Option<&str>, default_file: &str, package: &str) -> String {
    match custom {
        Some(path) => path.replace(PACKAGE_PLACEHOLDER, package),
        None => format!("src/{package}/{default_file}"),
    }
}

/// `src/greeter/cli.py` becomes `greeter.cli`.
pub fn module_path(file: &str) -> String {
    let file = file.strip_prefix("src/").unwrap_or(file);
    let file = file.strip_suffix(".py").unwrap_or(file);
    file.replace('/', ".")
}

fn cli_path(ir: &IntermediateRepresentation, package: &str) -> String {
    resolve_path(ir.project.cli_path.as_deref(), "cli.py", package)
}

fn hooks_path(ir: &IntermediateRepresentation, package: &str) -> String {
    resolve_path(ir.project.hooks_path.as_deref(), "hooks.py", package)
}

impl Renderer for PythonRenderer {
    fn language(&self) -> &str {
        "python"
    }

    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str> {
        BTreeMap::from([
            (ComponentKind::Source, "py"),
            (ComponentKind::Manifest, "toml"),
            (ComponentKind::Ignore, "gitignore"),
        ])
    }

    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext {
        let package = package_name(ir);
        let commands = click::commands(&ir.cli);
        let globals = click::global_decorators(&ir.cli);
        let uses_pathlib = globals.iter().any(|d| d.contains("pathlib."))
            || commands.iter().any(|cmd| cmd.signature.contains("pathlib."));
        let view = PythonView {
            commands,
            globals,
            global_params: click::global_params(&ir.cli),
            entry_module: module_path(&cli_path(ir, &package)),
            hooks_module: module_path(&hooks_path(ir, &package)),
            requirements: ir
                .dependencies_for("python")
                .iter()
                .filter(|name| name.as_str() != "click")
                .cloned()
                .collect(),
            package,
            uses_pathlib,
        };
        RenderContext::from_ir(self.language(), ir).with("python", view)
    }

    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::from([
            ("python_ident", python_ident as Filter),
            ("python_class", python_class as Filter),
            ("python_type", python_type as Filter),
        ])
    }

    fn output_structure(&self, ir: &IntermediateRepresentation) -> IndexMap<String, String> {
        let package = package_name(ir);
        IndexMap::from([
            ("python/cli".to_string(), cli_path(ir, &package)),
            ("python/hooks".to_string(), hooks_path(ir, &package)),
            (
                "python/package_init".to_string(),
                format!("src/{package}/__init__.py"),
            ),
            ("python/pyproject".to_string(), "pyproject.toml".to_string()),
            ("shared/gitignore".to_string(), ".gitignore".to_string()),
        ])
    }
}

fn python_ident(value: &str) -> String {
    PYTHON_NAMING.field_name(value)
}

fn python_class(value: &str) -> String {
    PYTHON_NAMING.type_name(value)
}

fn python_type(value: &str) -> String {
    match ValueType::from_name(value) {
        Some(ty) => PythonTypeMapper.map_type(ty).to_string(),
        None => value.to_string(),
    }
}
