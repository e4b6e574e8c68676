//! The renderers this binary ships with.

use std::{path::Path, sync::Arc};

use weave_codegen::{ComponentRegistry, Engine};
use weave_codegen_nodejs::NodeRenderer;
use weave_codegen_python::PythonRenderer;
use weave_codegen_rust::RustRenderer;
use weave_codegen_typescript::TypeScriptRenderer;

/// Components whose output belongs to the user once it exists.
pub const USER_OWNED_SUFFIX: &str = "/hooks";

/// Components written with the executable bit set.
pub const EXECUTABLE_COMPONENTS: &[&str] = &["nodejs/cli"];

/// An engine over `components_dir` with every bundled renderer registered.
pub fn engine(components_dir: &Path) -> weave_codegen::Result<Engine> {
    let registry = ComponentRegistry::load(components_dir)?;
    let mut engine = Engine::new(Arc::new(registry));
    engine.register_renderer(RustRenderer::new())?;
    engine.register_renderer(PythonRenderer::new())?;
    engine.register_renderer(NodeRenderer::new())?;
    engine.register_renderer(TypeScriptRenderer::new())?;
    Ok(engine)
}
