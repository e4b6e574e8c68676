use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::Serialize;
use serde_json::{Map, Value};
use weave_ir::IntermediateRepresentation;

/// Resolves `{% include %}` / `{% import %}` targets while rendering.
pub trait ComponentSource: Send + Sync {
    fn component(&self, name: &str) -> Option<Arc<str>>;
}

impl ComponentSource for BTreeMap<String, String> {
    fn component(&self, name: &str) -> Option<Arc<str>> {
        self.get(name).map(|s| Arc::from(s.as_str()))
    }
}

/// Values a template renders against.
///
/// Built from the IR by [`RenderContext::from_ir`] and extended by each
/// renderer with language conveniences. Cloning is cheap relative to a
/// render and never touches the IR.
#[derive(Clone, Default)]
pub struct RenderContext {
    values: Map<String, Value>,
    components: Option<Arc<dyn ComponentSource>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with every IR section at the top level plus:
    /// - `language`: the renderer's key
    /// - `commands`: every command depth-first
    /// - `leaves`: commands that get a hook
    pub fn from_ir(language: &str, ir: &IntermediateRepresentation) -> Self {
        let mut ctx = Self::new();
        ctx.insert("language", language);
        ctx.insert("project", &ir.project);
        ctx.insert("cli", &ir.cli);
        ctx.insert("commands", ir.cli.walk());
        ctx.insert("leaves", ir.cli.leaves());
        ctx.insert("dependencies", &ir.dependencies);
        ctx.insert("features", &ir.features);
        ctx.insert("requirements", &ir.requirements);
        ctx.insert("metadata", &ir.metadata);
        ctx
    }

    /// Add or replace a top-level value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.values.insert(key, value);
            }
            Err(err) => tracing::warn!(key = %key, error = %err, "dropping unserializable value"),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Make components available to `{% include %}`.
    pub fn attach_components(&mut self, source: Arc<dyn ComponentSource>) {
        self.components = Some(source);
    }

    pub fn components(&self) -> Option<&Arc<dyn ComponentSource>> {
        self.components.as_ref()
    }

    pub(crate) fn to_template_value(&self) -> minijinja::Value {
        minijinja::Value::from_serialize(&self.values)
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("components", &self.components.is_some())
            .finish()
    }
}
