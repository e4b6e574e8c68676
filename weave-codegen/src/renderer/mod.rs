//! The per-language renderer abstraction.
//!
//! A [`Renderer`] turns the IR plus a set of components into files for one
//! target language. Renderers never touch the filesystem: the engine fetches
//! component text from the registry and the caller decides what to write.

mod context;
mod filters;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use weave_ir::IntermediateRepresentation;

pub use context::{ComponentSource, RenderContext};
pub use filters::{common_filters, quote};

use crate::Result;

/// A template filter: takes the piped value as a string.
pub type Filter = fn(&str) -> String;

/// The kinds of files a renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Entry point and hook sources.
    Source,
    /// Standalone type declarations (statically typed targets).
    Types,
    /// Package manifest (`Cargo.toml`, `package.json`, `pyproject.toml`).
    Manifest,
    /// Tool configuration such as `tsconfig.json`.
    Config,
    Ignore,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Types => "types",
            Self::Manifest => "manifest",
            Self::Config => "config",
            Self::Ignore => "ignore",
        }
    }
}

/// Language backend for the engine.
///
/// Implement this trait to add support for generating a CLI in a new
/// language. `language()` is the registry key and must be non-empty and
/// unique within an engine.
pub trait Renderer: Send + Sync {
    /// Language identifier (e.g., "rust", "python").
    fn language(&self) -> &str;

    /// File extension per output kind.
    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str>;

    /// Build the template context for `ir`: the IR itself plus whatever
    /// naming and type conveniences the language's templates need.
    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext;

    /// Filters added on top of [`common_filters`]. A filter with the same
    /// name as a common one replaces it.
    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::new()
    }

    /// Render one component.
    fn render_component(&self, name: &str, source: &str, context: &RenderContext) -> Result<String> {
        crate::template::render(name, source, context, &self.custom_filters())
    }

    /// Components to render for `ir`, mapped to their output path relative
    /// to the destination root. Iteration order is render order.
    fn output_structure(&self, ir: &IntermediateRepresentation) -> IndexMap<String, String>;
}

impl std::fmt::Debug for dyn Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("language", &self.language())
            .finish()
    }
}
