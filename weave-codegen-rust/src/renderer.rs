use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use weave_codegen::{ComponentKind, Filter, RenderContext, Renderer, TypeMapper};
use weave_ir::{IntermediateRepresentation, ValueType};

use crate::{RUST_NAMING, RustTypeMapper, clap};

/// Crates every generated project depends on.
const BASE_CRATES: [&str; 2] = ["clap", "eyre"];

/// Renders a clap-derive binary crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl RustRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct RustView {
    commands: Vec<clap::ClapCommand>,
    root: Vec<clap::ClapVariant>,
    globals: Vec<clap::ClapField>,
    /// Extra crates from the manifest, base crates removed.
    crates: Vec<String>,
}

impl Renderer for RustRenderer {
    fn language(&self) -> &str {
        "rust"
    }

    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str> {
        BTreeMap::from([
            (ComponentKind::Source, "rs"),
            (ComponentKind::Manifest, "toml"),
            (ComponentKind::Ignore, "gitignore"),
        ])
    }

    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext {
        let (root, commands) = clap::commands(&ir.cli);
        let crates = ir
            .dependencies_for("rust")
            .iter()
            .filter(|name| !BASE_CRATES.contains(&name.as_str()))
            .cloned()
            .collect();

        RenderContext::from_ir(self.language(), ir).with(
            "rust",
            RustView {
                commands,
                root,
                globals: clap::global_fields(&ir.cli),
                crates,
            },
        )
    }

    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::from([
            ("rust_ident", rust_ident as Filter),
            ("rust_type_name", rust_type_name as Filter),
            ("rust_string", rust_string as Filter),
            ("rust_type", rust_type as Filter),
        ])
    }

    fn output_structure(&self, _ir: &IntermediateRepresentation) -> IndexMap<String, String> {
        IndexMap::from([
            ("rust/main".to_string(), "src/main.rs".to_string()),
            ("rust/hooks".to_string(), "src/hooks.rs".to_string()),
            ("rust/cargo_toml".to_string(), "Cargo.toml".to_string()),
            ("shared/gitignore".to_string(), ".gitignore".to_string()),
        ])
    }
}

fn rust_ident(value: &str) -> String {
    RUST_NAMING.field_name(value)
}

fn rust_type_name(value: &str) -> String {
    RUST_NAMING.type_name(value)
}

/// A Rust string literal, quotes included.
fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

/// IR type name (`int`, `path`, ...) to a Rust type; unknown names pass
/// through.
fn rust_type(value: &str) -> String {
    match ValueType::from_name(value) {
        Some(ty) => RustTypeMapper.map_type(ty).to_string(),
        None => value.to_string(),
    }
}
