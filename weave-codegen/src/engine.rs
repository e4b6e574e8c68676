//! The generation orchestrator.
//!
//! An [`Engine`] owns a component registry and one renderer per language.
//! Renderers are registered up front; afterwards the engine is only read, so
//! one engine can serve concurrent `generate` calls for different languages.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use weave_manifest::Manifest;

use crate::{
    CancellationToken, Clock, ComponentError, ComponentRegistry, Error, Result,
    lower::build_ir,
    renderer::{ComponentSource, Renderer},
};

/// Where a `generate` call is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidatingInput,
    BuildingIr,
    ResolvingOutputStructure,
    RenderingComponents,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ValidatingInput => "validating input",
            Stage::BuildingIr => "building IR",
            Stage::ResolvingOutputStructure => "resolving output structure",
            Stage::RenderingComponents => "rendering components",
            Stage::Done => "done",
            Stage::Failed => "failed",
        })
    }
}

/// Per-call knobs for [`Engine::generate_with`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Re-read components whose files changed since they were cached.
    pub auto_reload: bool,
    /// Render components after the components they declare. A dependency
    /// cycle then fails the whole call.
    pub dependency_order: bool,
    /// Checked before each component render.
    pub cancel: Option<CancellationToken>,
}

/// Output of one `generate` call.
#[derive(Debug)]
pub struct GenerationResult {
    pub language: String,
    /// Rendered files keyed by destination path.
    pub files: BTreeMap<PathBuf, String>,
    /// Components that produced no file, in render order.
    pub errors: Vec<ComponentError>,
}

impl GenerationResult {
    fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            files: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// True when every component rendered.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_canceled(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e.error, Error::Canceled))
    }

    /// Names of the components that failed.
    pub fn failed_components(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.component.as_str()).collect()
    }
}

/// Resolves template includes through the engine's registry.
struct RegistrySource {
    registry: Arc<ComponentRegistry>,
    auto_reload: bool,
}

impl ComponentSource for RegistrySource {
    fn component(&self, name: &str) -> Option<Arc<str>> {
        self.registry.get(name, self.auto_reload).ok()
    }
}

pub struct Engine {
    registry: Arc<ComponentRegistry>,
    renderers: BTreeMap<String, Arc<dyn Renderer>>,
    clock: Option<Arc<dyn Clock>>,
}

impl Engine {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            renderers: BTreeMap::new(),
            clock: None,
        }
    }

    /// Stamp `generated_at` (RFC 3339) into every render context.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Register a renderer under its `language()`.
    ///
    /// Fails if the language is empty or already taken; the existing
    /// registration is left untouched.
    pub fn register_renderer(&mut self, renderer: impl Renderer + 'static) -> Result<()> {
        let language = checked_language(&renderer)?;
        if self.renderers.contains_key(&language) {
            return Err(Error::RendererAlreadyRegistered { language });
        }
        tracing::debug!(language = %language, "registered renderer");
        self.renderers.insert(language, Arc::new(renderer));
        Ok(())
    }

    /// Register a renderer, replacing any existing one for its language.
    /// Returns the replaced renderer.
    pub fn register_renderer_override(
        &mut self,
        renderer: impl Renderer + 'static,
    ) -> Result<Option<Arc<dyn Renderer>>> {
        let language = checked_language(&renderer)?;
        let previous = self.renderers.insert(language.clone(), Arc::new(renderer));
        if previous.is_some() {
            tracing::debug!(language = %language, "replaced renderer");
        }
        Ok(previous)
    }

    pub fn renderer(&self, language: &str) -> Option<&Arc<dyn Renderer>> {
        self.renderers.get(language)
    }

    /// Registered languages, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }

    /// Generate `language` output for `manifest` with default options.
    pub fn generate(
        &self,
        manifest: &Manifest,
        language: &str,
        dest_root: &Path,
    ) -> Result<GenerationResult> {
        self.generate_with(manifest, language, dest_root, &GenerateOptions::default())
    }

    /// Generate `language` output for `manifest`.
    ///
    /// Returns `Err` only for failures that prevent any output: an unknown
    /// language, a manifest the IR cannot be built from, or a dependency
    /// cycle when `dependency_order` is set. Failures of single components
    /// are collected in [`GenerationResult::errors`] and the remaining
    /// components still render.
    pub fn generate_with(
        &self,
        manifest: &Manifest,
        language: &str,
        dest_root: &Path,
        options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        enter(language, Stage::ValidatingInput);
        let renderer = self
            .renderers
            .get(language)
            .ok_or_else(|| Error::RendererNotRegistered {
                language: language.to_string(),
                available: self.languages().join(", "),
            })
            .map_err(|err| fail(language, err))?;

        enter(language, Stage::BuildingIr);
        let ir = build_ir(manifest).map_err(|err| fail(language, err))?;

        enter(language, Stage::ResolvingOutputStructure);
        let structure = renderer.output_structure(&ir);
        let mut order: Vec<String> = structure.keys().cloned().collect();
        if options.dependency_order {
            order = self
                .registry
                .dependency_order(&order)
                .map_err(|err| fail(language, err))?;
        }

        enter(language, Stage::RenderingComponents);
        let mut context = renderer.transform_context(&ir);
        if let Some(clock) = &self.clock {
            context.insert("generated_at", clock.now().to_rfc3339());
        }
        context.attach_components(Arc::new(RegistrySource {
            registry: Arc::clone(&self.registry),
            auto_reload: options.auto_reload,
        }));

        let mut result = GenerationResult::new(language);
        let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
        for name in &order {
            if options.cancel.as_ref().is_some_and(CancellationToken::is_canceled) {
                tracing::debug!(language, component = %name, "canceled");
                result
                    .errors
                    .push(ComponentError::new(name, language, Error::Canceled));
                break;
            }
            let Some(relative) = structure.get(name) else {
                continue;
            };
            let destination = match output_path(dest_root, name, relative) {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(language, component = %name, error = %err, "component skipped");
                    result.errors.push(ComponentError::new(name, language, err));
                    continue;
                }
            };
            if let Some(owner) = claimed.get(&destination) {
                let err = Error::OutputPathConflict {
                    name: name.clone(),
                    path: destination,
                    owner: owner.to_string(),
                };
                tracing::warn!(language, component = %name, error = %err, "component skipped");
                result.errors.push(ComponentError::new(name, language, err));
                continue;
            }
            claimed.insert(destination.clone(), name.as_str());

            let rendered = self
                .registry
                .get(name, options.auto_reload)
                .and_then(|source| renderer.render_component(name, &source, &context));
            match rendered {
                Ok(content) => {
                    tracing::debug!(language, component = %name, path = %relative, "rendered");
                    result.files.insert(destination, content);
                }
                Err(err) => {
                    tracing::warn!(language, component = %name, error = %err, "component failed");
                    result.errors.push(ComponentError::new(name, language, err));
                }
            }
        }

        enter(language, Stage::Done);
        Ok(result)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("components", &self.registry.root())
            .field("languages", &self.languages())
            .field("clock", &self.clock.is_some())
            .finish()
    }
}

fn checked_language(renderer: &dyn Renderer) -> Result<String> {
    let language = renderer.language().trim();
    if language.is_empty() {
        return Err(Error::EmptyLanguage);
    }
    Ok(language.to_string())
}

/// Join `relative` onto `dest_root`, refusing paths that would leave it.
/// `.` segments are dropped so equivalent spellings claim the same file.
fn output_path(dest_root: &Path, name: &str, relative: &str) -> Result<PathBuf> {
    let unsafe_path = || Error::UnsafeOutputPath {
        name: name.to_string(),
        path: relative.to_string(),
    };
    let mut cleaned = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => cleaned.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path());
            }
        }
    }
    if cleaned.as_os_str().is_empty() {
        return Err(unsafe_path());
    }
    Ok(dest_root.join(cleaned))
}

fn enter(language: &str, stage: Stage) {
    tracing::debug!(language, stage = %stage, "generation stage");
}

fn fail(language: &str, err: Error) -> Error {
    tracing::debug!(language, stage = %Stage::Failed, error = %err, "generation stage");
    err
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use weave_manifest::parse_str;

    use super::*;
    use crate::{
        FixedClock, RenderContext,
        testing::{ComponentDir, StubRenderer},
    };

    const HELLO: &str = r#"
        package_name = "hello"
        command_name = "hello"

        [cli.commands.hello]
        args = [{ name = "name", type = "string", required = true }]
    "#;

    const COMMANDS: &str =
        "{% for c in commands %}{{ c.name }}({% for p in c.parameters %}{{ p.name }}{% endfor %})\n{% endfor %}";

    fn engine(dir: &ComponentDir) -> Engine {
        Engine::new(Arc::new(dir.registry()))
    }

    #[test]
    fn test_end_to_end_hello() {
        let dir = ComponentDir::new().unwrap();
        dir.write("command_handler", COMMANDS).unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("command_handler", "cli.out"))
            .unwrap();

        let manifest = parse_str(HELLO).unwrap();
        let result = engine.generate(&manifest, "stub", Path::new("")).unwrap();

        assert!(result.is_complete());
        assert_eq!(result.files.len(), 1);
        let content = &result.files[Path::new("cli.out")];
        assert!(content.contains("hello"));
        assert!(content.contains("name"));
        insta::assert_snapshot!(content.trim_end(), @"hello(name)");
    }

    #[test]
    fn test_partial_failure_keeps_siblings() {
        let dir = ComponentDir::new().unwrap();
        dir.write("a", "A").unwrap();
        dir.write("c", "C").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("a", "a.out")
                    .with_component("b", "b.out")
                    .with_component("c", "c.out"),
            )
            .unwrap();

        let manifest = parse_str(HELLO).unwrap();
        let dest = Path::new("/out");
        let result = engine.generate(&manifest, "stub", dest).unwrap();

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[&dest.join("a.out")], "A");
        assert_eq!(result.files[&dest.join("c.out")], "C");
        assert_eq!(result.failed_components(), vec!["b"]);
        assert!(matches!(
            result.errors[0].error,
            Error::ComponentNotFound { ref name } if name == "b"
        ));
        assert_eq!(result.errors[0].language, "stub");
    }

    #[test]
    fn test_syntax_and_render_errors_are_per_component() {
        let dir = ComponentDir::new().unwrap();
        dir.write("broken", "{% if %}").unwrap();
        dir.write("bad_filter", "{{ project.name | nope }}").unwrap();
        dir.write("good", "{{ project.name }}").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("broken", "broken.out")
                    .with_component("bad_filter", "bad.out")
                    .with_component("good", "good.out"),
            )
            .unwrap();

        let result = engine
            .generate(&parse_str(HELLO).unwrap(), "stub", Path::new(""))
            .unwrap();
        assert_eq!(result.files[Path::new("good.out")], "hello");
        assert!(matches!(result.errors[0].error, Error::TemplateSyntax { .. }));
        assert!(matches!(result.errors[1].error, Error::Render { .. }));
    }

    #[test]
    fn test_unknown_renderer_lists_available() {
        let dir = ComponentDir::new().unwrap();
        let mut engine = engine(&dir);
        engine.register_renderer(StubRenderer::new("rust")).unwrap();
        engine.register_renderer(StubRenderer::new("python")).unwrap();

        let err = engine
            .generate(&parse_str(HELLO).unwrap(), "cobol", Path::new(""))
            .unwrap_err();
        match err {
            Error::RendererNotRegistered { language, available } => {
                assert_eq!(language, "cobol");
                assert_eq!(available, "python, rust");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_registration_guard() {
        let dir = ComponentDir::new().unwrap();
        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("first", "1"))
            .unwrap();

        let err = engine
            .register_renderer(StubRenderer::new("stub").with_component("second", "2"))
            .unwrap_err();
        assert!(matches!(err, Error::RendererAlreadyRegistered { ref language } if language == "stub"));

        let manifest = parse_str(HELLO).unwrap();
        let ir = build_ir(&manifest).unwrap();
        let kept = engine.renderer("stub").unwrap().output_structure(&ir);
        assert!(kept.contains_key("first"));

        let replaced = engine
            .register_renderer_override(StubRenderer::new("stub").with_component("second", "2"))
            .unwrap();
        assert!(replaced.is_some());
        let now = engine.renderer("stub").unwrap().output_structure(&ir);
        assert!(now.contains_key("second"));
    }

    #[test]
    fn test_empty_language_rejected() {
        let dir = ComponentDir::new().unwrap();
        let mut engine = engine(&dir);
        assert!(matches!(
            engine.register_renderer(StubRenderer::new("  ")),
            Err(Error::EmptyLanguage)
        ));
        assert!(engine.languages().is_empty());
    }

    #[test]
    fn test_invalid_manifest_is_fatal() {
        let dir = ComponentDir::new().unwrap();
        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("x", "x.out"))
            .unwrap();

        let manifest = parse_str(
            r#"
            package_name = "dup"
            command_name = "dup"

            [cli.commands.run]
            args = [{ name = "a-b" }]
            options = [{ name = "a_b" }]
            "#,
        )
        .unwrap();
        let err = engine.generate(&manifest, "stub", Path::new("")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_canceled_before_start() {
        let dir = ComponentDir::new().unwrap();
        dir.write("a", "A").unwrap();
        dir.write("b", "B").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("a", "a.out")
                    .with_component("b", "b.out"),
            )
            .unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let options = GenerateOptions {
            cancel: Some(token),
            ..Default::default()
        };
        let result = engine
            .generate_with(&parse_str(HELLO).unwrap(), "stub", Path::new(""), &options)
            .unwrap();

        assert!(result.files.is_empty());
        assert!(result.is_canceled());
        assert_eq!(result.failed_components(), vec!["a"]);
    }

    struct CancelAfterRender {
        inner: StubRenderer,
        token: CancellationToken,
    }

    impl Renderer for CancelAfterRender {
        fn language(&self) -> &str {
            self.inner.language()
        }

        fn file_extensions(&self) -> BTreeMap<crate::ComponentKind, &'static str> {
            self.inner.file_extensions()
        }

        fn transform_context(&self, ir: &weave_ir::IntermediateRepresentation) -> RenderContext {
            self.inner.transform_context(ir)
        }

        fn render_component(&self, name: &str, source: &str, context: &RenderContext) -> Result<String> {
            let out = self.inner.render_component(name, source, context);
            self.token.cancel();
            out
        }

        fn output_structure(
            &self,
            ir: &weave_ir::IntermediateRepresentation,
        ) -> indexmap::IndexMap<String, String> {
            self.inner.output_structure(ir)
        }
    }

    #[test]
    fn test_cancel_mid_generation_keeps_rendered_files() {
        let dir = ComponentDir::new().unwrap();
        for name in ["a", "b", "c"] {
            dir.write(name, name).unwrap();
        }

        let token = CancellationToken::new();
        let mut engine = engine(&dir);
        engine
            .register_renderer(CancelAfterRender {
                inner: StubRenderer::new("stub")
                    .with_component("a", "a.out")
                    .with_component("b", "b.out")
                    .with_component("c", "c.out"),
                token: token.clone(),
            })
            .unwrap();

        let options = GenerateOptions {
            cancel: Some(token),
            ..Default::default()
        };
        let result = engine
            .generate_with(&parse_str(HELLO).unwrap(), "stub", Path::new(""), &options)
            .unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[Path::new("a.out")], "a");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].component, "b");
        assert!(result.is_canceled());
    }

    #[test]
    fn test_dependency_order_and_cycles() {
        let dir = ComponentDir::new().unwrap();
        dir.write("main", "{# Dependencies: types #}\nmain").unwrap();
        dir.write("types", "types").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("main", "main.out")
                    .with_component("types", "types.out"),
            )
            .unwrap();
        let manifest = parse_str(HELLO).unwrap();
        let options = GenerateOptions {
            dependency_order: true,
            ..Default::default()
        };

        let result = engine
            .generate_with(&manifest, "stub", Path::new(""), &options)
            .unwrap();
        assert!(result.is_complete());

        dir.write("types", "{# Dependencies: main #}\ntypes").unwrap();
        engine.registry().reload("types");
        let err = engine
            .generate_with(&manifest, "stub", Path::new(""), &options)
            .unwrap_err();
        assert!(matches!(err, Error::DependencyCycle { .. }));
        assert!(err.is_fatal());

        // Without ordering the cycle is never looked at.
        assert!(engine.generate(&manifest, "stub", Path::new("")).is_ok());
    }

    #[test]
    fn test_includes_resolve_through_registry() {
        let dir = ComponentDir::new().unwrap();
        dir.write("shared/banner", "# {{ project.name }}").unwrap();
        dir.write("main", "{% include 'shared/banner' %}\nbody").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("main", "main.out"))
            .unwrap();

        let result = engine
            .generate(&parse_str(HELLO).unwrap(), "stub", Path::new(""))
            .unwrap();
        assert_eq!(result.files[Path::new("main.out")], "# hello\nbody");
    }

    #[test]
    fn test_output_is_deterministic_without_clock() {
        let dir = ComponentDir::new().unwrap();
        dir.write("main", "{{ generated_at | default('none') }} {{ commands | length }}")
            .unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("main", "main.out"))
            .unwrap();
        let manifest = parse_str(HELLO).unwrap();

        let first = engine.generate(&manifest, "stub", Path::new("")).unwrap();
        let second = engine.generate(&manifest, "stub", Path::new("")).unwrap();
        assert_eq!(first.files, second.files);
        assert_eq!(first.files[Path::new("main.out")], "none 1");
    }

    #[test]
    fn test_clock_stamps_generated_at() {
        let dir = ComponentDir::new().unwrap();
        dir.write("main", "{{ generated_at }}").unwrap();

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let mut engine = engine(&dir).with_clock(clock);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("main", "main.out"))
            .unwrap();

        let result = engine
            .generate(&parse_str(HELLO).unwrap(), "stub", Path::new(""))
            .unwrap();
        assert_eq!(
            result.files[Path::new("main.out")],
            "2024-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_hot_reload_between_generations() {
        let dir = ComponentDir::new().unwrap();
        dir.write("main", "v1").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(StubRenderer::new("stub").with_component("main", "main.out"))
            .unwrap();
        let manifest = parse_str(HELLO).unwrap();
        assert_eq!(
            engine.generate(&manifest, "stub", Path::new("")).unwrap().files[Path::new("main.out")],
            "v1"
        );

        dir.write("main", "v2").unwrap();
        dir.touch("main", 60).unwrap();

        let cached = engine.generate(&manifest, "stub", Path::new("")).unwrap();
        assert_eq!(cached.files[Path::new("main.out")], "v1");

        let options = GenerateOptions {
            auto_reload: true,
            ..Default::default()
        };
        let reloaded = engine
            .generate_with(&manifest, "stub", Path::new(""), &options)
            .unwrap();
        assert_eq!(reloaded.files[Path::new("main.out")], "v2");
    }

    #[test]
    fn test_shared_output_path_is_reported() {
        let dir = ComponentDir::new().unwrap();
        dir.write("a", "AAA").unwrap();
        dir.write("b", "BBB").unwrap();
        dir.write("c", "CCC").unwrap();

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("a", "same.out")
                    .with_component("b", "./same.out")
                    .with_component("c", "c.out"),
            )
            .unwrap();

        let dest = Path::new("/out");
        let result = engine
            .generate(&parse_str(HELLO).unwrap(), "stub", dest)
            .unwrap();

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[&dest.join("same.out")], "AAA");
        assert_eq!(result.files[&dest.join("c.out")], "CCC");
        assert_eq!(result.failed_components(), vec!["b"]);
        match &result.errors[0].error {
            Error::OutputPathConflict { name, path, owner } => {
                assert_eq!(name, "b");
                assert_eq!(path, &dest.join("same.out"));
                assert_eq!(owner, "a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_output_paths_stay_under_dest_root() {
        let dir = ComponentDir::new().unwrap();
        for name in ["absolute", "parent", "empty", "fine"] {
            dir.write(name, name).unwrap();
        }

        let mut engine = engine(&dir);
        engine
            .register_renderer(
                StubRenderer::new("stub")
                    .with_component("absolute", "/etc/cron.d/x")
                    .with_component("parent", "src/../../x")
                    .with_component("empty", ".")
                    .with_component("fine", "src/./fine.out"),
            )
            .unwrap();

        let dest = Path::new("/out");
        let result = engine
            .generate(&parse_str(HELLO).unwrap(), "stub", dest)
            .unwrap();

        let paths: Vec<&Path> = result.files.keys().map(PathBuf::as_path).collect();
        assert_eq!(paths, vec![Path::new("/out/src/fine.out")]);
        assert_eq!(result.failed_components(), vec!["absolute", "parent", "empty"]);
        assert!(
            result
                .errors
                .iter()
                .all(|e| matches!(e.error, Error::UnsafeOutputPath { .. }))
        );
    }

    #[test]
    fn test_concurrent_generations_share_one_engine() {
        let dir = ComponentDir::new().unwrap();
        dir.write("main", "{{ language }}:{{ project.name }}").unwrap();

        let mut engine = engine(&dir);
        for language in ["one", "two", "three", "four"] {
            engine
                .register_renderer(StubRenderer::new(language).with_component("main", "main.out"))
                .unwrap();
        }
        let manifest = parse_str(HELLO).unwrap();
        let options = GenerateOptions {
            auto_reload: true,
            ..Default::default()
        };

        std::thread::scope(|s| {
            let handles: Vec<_> = engine
                .languages()
                .into_iter()
                .map(|language| {
                    let (engine, manifest, options) = (&engine, &manifest, &options);
                    s.spawn(move || {
                        (0..20)
                            .map(|_| {
                                engine
                                    .generate_with(manifest, language, Path::new(""), options)
                                    .unwrap()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                for result in handle.join().unwrap() {
                    assert!(result.is_complete());
                    let expected = format!("{}:hello", result.language);
                    assert_eq!(result.files[Path::new("main.out")], expected);
                }
            }
        });
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
