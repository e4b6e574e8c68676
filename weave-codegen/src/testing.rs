//! Test utilities for renderers and the engine.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use indexmap::IndexMap;
use tempfile::TempDir;
use weave_ir::IntermediateRepresentation;

pub use crate::clock::FixedClock;
use crate::{
    ComponentKind, ComponentRegistry, Filter, RenderContext, Renderer,
    registry::COMPONENT_EXTENSION,
};

/// A renderer with a fixed output structure and the plain IR context.
///
/// Adds a `stub_tag` filter (`x` → `<stub:x>`).
#[derive(Debug, Clone)]
pub struct StubRenderer {
    language: String,
    components: IndexMap<String, String>,
}

impl StubRenderer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            components: IndexMap::new(),
        }
    }

    /// Render `name` to `path`.
    pub fn with_component(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.components.insert(name.into(), path.into());
        self
    }
}

fn stub_tag(value: &str) -> String {
    format!("<stub:{}>", value)
}

impl Renderer for StubRenderer {
    fn language(&self) -> &str {
        &self.language
    }

    fn file_extensions(&self) -> BTreeMap<ComponentKind, &'static str> {
        BTreeMap::from([(ComponentKind::Source, "out")])
    }

    fn transform_context(&self, ir: &IntermediateRepresentation) -> RenderContext {
        RenderContext::from_ir(&self.language, ir)
    }

    fn custom_filters(&self) -> BTreeMap<&'static str, Filter> {
        BTreeMap::from([("stub_tag", stub_tag as Filter)])
    }

    fn output_structure(&self, _ir: &IntermediateRepresentation) -> IndexMap<String, String> {
        self.components.clone()
    }
}

/// A temporary components directory, removed on drop.
#[derive(Debug)]
pub struct ComponentDir {
    dir: TempDir,
}

impl ComponentDir {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write component `name` (`/`-separated, no extension).
    pub fn write(&self, name: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn remove(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.file(name))
    }

    /// Move a component's mtime `secs` seconds into the future, so a reload
    /// sees it as changed regardless of filesystem timestamp resolution.
    pub fn touch(&self, name: &str, secs: u64) -> io::Result<()> {
        let mtime = SystemTime::now() + Duration::from_secs(secs);
        fs::File::options()
            .write(true)
            .open(self.file(name))?
            .set_modified(mtime)
    }

    /// A lazily loading registry over this directory.
    pub fn registry(&self) -> ComponentRegistry {
        ComponentRegistry::new(self.path())
    }

    fn file(&self, name: &str) -> PathBuf {
        let (dirs, file) = name.rsplit_once('/').unwrap_or(("", name));
        let mut path = self.path().to_path_buf();
        for segment in dirs.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", file, COMPONENT_EXTENSION));
        path
    }
}
