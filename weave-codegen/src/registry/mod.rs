//! Component registry: the on-disk template fragment set and its cache.
//!
//! Components are `.j2` files under a root directory. A component's name is
//! its path relative to the root without the extension, always `/`-separated
//! (`rust/main.j2` → `rust/main`).
//!
//! Cached entries are `Arc<Component>` values behind a `RwLock`. Reloads read
//! the file without holding the lock and then swap the entry in one write, so
//! a reader sees either the old or the new component, never a mix.

mod component;
mod directive;
mod graph;

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

pub use component::{Component, ComponentMetadata, LoadReport};
use walkdir::WalkDir;

use crate::{Error, Result, template};

/// File extension of component files.
pub const COMPONENT_EXTENSION: &str = "j2";

#[derive(Debug)]
pub struct ComponentRegistry {
    root: PathBuf,
    components: RwLock<HashMap<String, Arc<Component>>>,
}

impl ComponentRegistry {
    /// Create a registry that loads components lazily on first `get`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            components: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry and eagerly load every component under `root`.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let registry = Self::new(root);
        registry.load_all(false)?;
        Ok(registry)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every component file under the root.
    ///
    /// Entries already cached are kept and reported as skipped unless
    /// `force_reload` is set. A missing root directory loads nothing.
    pub fn load_all(&self, force_reload: bool) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for (name, path) in self.discover()? {
            if !force_reload && self.cached(&name).is_some() {
                tracing::warn!(component = %name, "already loaded, not overwriting");
                report.skipped.push(name);
                continue;
            }
            let component = Component::read(&name, &path)?;
            self.insert(component);
            report.loaded.push(name);
        }

        tracing::debug!(
            root = %self.root.display(),
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            "loaded components"
        );
        Ok(report)
    }

    /// Component files on disk as `(name, path)`, sorted by name.
    pub fn discover(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "components directory not found");
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| Error::Io {
                path: e.path().unwrap_or(&self.root).to_path_buf(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = self.name_for(entry.path()) {
                found.push((name, entry.into_path()));
            }
        }
        found.sort();
        Ok(found)
    }

    /// Fetch a component's template text.
    ///
    /// With `auto_reload`, the component and its declared dependencies are
    /// re-read when their files' mtimes changed since they were cached.
    pub fn get(&self, name: &str, auto_reload: bool) -> Result<Arc<str>> {
        if auto_reload {
            self.refresh(name);
        }
        match self.cached(name) {
            Some(component) => Ok(component.source()),
            None => self.load_one(name).map(|c| c.source()),
        }
    }

    /// True if the component is cached or present on disk.
    pub fn exists(&self, name: &str) -> bool {
        self.cached(name).is_some() || self.path_for(name).is_some_and(|p| p.is_file())
    }

    /// Declared dependencies, empty when there are none or the component
    /// cannot be found.
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        self.cached(name)
            .or_else(|| self.load_one(name).ok())
            .map(|c| c.dependencies().to_vec())
            .unwrap_or_default()
    }

    /// Cached components that declare `name` as a dependency, sorted.
    pub fn dependents(&self, name: &str) -> Vec<String> {
        let components = self.read_map();
        let mut dependents: Vec<String> = components
            .values()
            .filter(|c| c.dependencies().iter().any(|d| d == name))
            .map(|c| c.name().to_string())
            .collect();
        dependents.sort();
        dependents
    }

    /// Re-read a component from disk. Returns false if its file is gone or
    /// unreadable, leaving any cached copy in place.
    pub fn reload(&self, name: &str) -> bool {
        let Some(path) = self.path_for(name).filter(|p| p.is_file()) else {
            return false;
        };
        match Component::read(name, &path) {
            Ok(component) => {
                tracing::debug!(component = name, "reloaded");
                self.insert(component);
                true
            }
            Err(err) => {
                tracing::warn!(component = name, error = %err, "reload failed");
                false
            }
        }
    }

    /// Check a component without rendering it.
    ///
    /// Reports template syntax errors, a self dependency, and dependencies
    /// that name no known component. Loads the component into the cache when
    /// it is not there yet, as `get` does, but never reloads a cached entry.
    pub fn validate(&self, name: &str) -> Vec<Error> {
        let source = match self.get(name, false) {
            Ok(source) => source,
            Err(err) => return vec![err],
        };

        let mut errors = Vec::new();
        if let Err(err) = template::check_syntax(name, &source) {
            errors.push(err);
        }
        for dependency in directive::parse_dependencies(&source) {
            if dependency == name {
                errors.push(Error::SelfDependency {
                    name: name.to_string(),
                });
            } else if !self.exists(&dependency) {
                errors.push(Error::UnknownDependency {
                    name: name.to_string(),
                    dependency,
                });
            }
        }
        errors
    }

    /// Validate every known component; only failing ones are returned.
    pub fn validate_all(&self) -> Result<BTreeMap<String, Vec<Error>>> {
        let mut names: HashSet<String> = self.read_map().keys().cloned().collect();
        names.extend(self.discover()?.into_iter().map(|(name, _)| name));

        let mut failures = BTreeMap::new();
        for name in names {
            let errors = self.validate(&name);
            if !errors.is_empty() {
                failures.insert(name, errors);
            }
        }
        Ok(failures)
    }

    /// Cache state of a component, `None` if it was never loaded.
    pub fn metadata(&self, name: &str) -> Option<ComponentMetadata> {
        let component = self.cached(name)?;
        let disk_mtime = std::fs::metadata(component.path())
            .and_then(|m| m.modified())
            .ok();
        Some(ComponentMetadata {
            path: component.path().to_path_buf(),
            disk_mtime,
            cached_mtime: component.mtime(),
            loaded_at: component.loaded_at(),
        })
    }

    /// Names of cached components, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_map().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    /// Drop every cached component.
    pub fn clear(&self) {
        self.components
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Component>>> {
        self.components.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, name: &str) -> Option<Arc<Component>> {
        self.read_map().get(name).cloned()
    }

    fn insert(&self, component: Component) -> Arc<Component> {
        let component = Arc::new(component);
        self.components
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(component.name().to_string(), Arc::clone(&component));
        component
    }

    fn load_one(&self, name: &str) -> Result<Arc<Component>> {
        let not_found = || Error::ComponentNotFound {
            name: name.to_string(),
        };
        let path = self
            .path_for(name)
            .filter(|p| p.is_file())
            .ok_or_else(not_found)?;
        let component = Component::read(name, &path)?;
        tracing::debug!(component = name, "loaded on demand");
        Ok(self.insert(component))
    }

    /// Reload `name` and everything it transitively declares, where stale.
    fn refresh(&self, name: &str) {
        let mut visited = HashSet::new();
        let mut pending = vec![name.to_string()];

        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(component) = self.cached(&current) else {
                continue;
            };
            let component = if component.is_stale() && self.reload(&current) {
                self.cached(&current).unwrap_or(component)
            } else {
                component
            };
            pending.extend(component.dependencies().iter().cloned());
        }
    }

    /// Path of a component file, `None` for names that would escape the root.
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return None;
        }
        let (dirs, file) = match name.rsplit_once('/') {
            Some((dirs, file)) => (Some(dirs), file),
            None => (None, name),
        };
        let mut path = self.root.clone();
        for segment in dirs.into_iter().flat_map(|d| d.split('/')) {
            path.push(segment);
        }
        path.push(format!("{}.{}", file, COMPONENT_EXTENSION));
        Some(path)
    }

    fn name_for(&self, path: &Path) -> Option<String> {
        if path.extension()? != COMPONENT_EXTENSION {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{Duration, SystemTime},
    };

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(format!("{}.j2", name));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn touch(path: &Path, mtime: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let registry = ComponentRegistry::load("/nonexistent/components").unwrap();
        assert!(registry.is_empty());
        assert!(!registry.exists("anything"));
    }

    #[test]
    fn test_load_all_names_are_relative_paths() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rust/main", "fn main() {}");
        write(temp.path(), "shared/gitignore", "target/");
        fs::write(temp.path().join("README.md"), "not a component").unwrap();

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert_eq!(registry.names(), vec!["rust/main", "shared/gitignore"]);
    }

    #[test]
    fn test_load_all_skips_existing_unless_forced() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a", "first");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        write(temp.path(), "a", "second");

        let report = registry.load_all(false).unwrap();
        assert_eq!(report.skipped, vec!["a"]);
        assert!(report.loaded.is_empty());
        assert_eq!(&*registry.get("a", false).unwrap(), "first");

        let report = registry.load_all(true).unwrap();
        assert_eq!(report.loaded, vec!["a"]);
        assert_eq!(&*registry.get("a", false).unwrap(), "second");
    }

    #[test]
    fn test_get_missing_component() {
        let temp = TempDir::new().unwrap();
        let registry = ComponentRegistry::new(temp.path());

        let err = registry.get("nope", false).unwrap_err();
        assert!(matches!(err, Error::ComponentNotFound { name } if name == "nope"));
    }

    #[test]
    fn test_lazy_load_on_get() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "python/cli", "import click");

        let registry = ComponentRegistry::new(temp.path());
        assert!(registry.is_empty());
        assert!(registry.exists("python/cli"));
        assert_eq!(&*registry.get("python/cli", false).unwrap(), "import click");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_hot_reload() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "cmd", "old content");
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert_eq!(&*registry.get("cmd", false).unwrap(), "old content");

        fs::write(&path, "new content").unwrap();
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));

        assert_eq!(&*registry.get("cmd", false).unwrap(), "old content");
        assert_eq!(&*registry.get("cmd", true).unwrap(), "new content");
        assert_eq!(&*registry.get("cmd", false).unwrap(), "new content");
    }

    #[test]
    fn test_hot_reload_fans_out_to_dependencies() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "page", "{# Dependencies: header #}\n{% include 'header' %}");
        let header = write(temp.path(), "header", "v1");
        touch(&header, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        fs::write(&header, "v2").unwrap();
        touch(&header, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));

        registry.get("page", true).unwrap();
        assert_eq!(&*registry.get("header", false).unwrap(), "v2");
    }

    #[test]
    fn test_hot_reload_follows_include_targets() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "page", "{% include \"header\" %}\nbody");
        let header = write(temp.path(), "header", "v1");
        touch(&header, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert_eq!(registry.dependencies("page"), vec!["header"]);
        assert_eq!(registry.dependents("header"), vec!["page"]);

        fs::write(&header, "v2").unwrap();
        touch(&header, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));

        registry.get("page", true).unwrap();
        assert_eq!(&*registry.get("header", false).unwrap(), "v2");
    }

    #[test]
    fn test_readers_never_see_a_partial_reload() {
        let temp = TempDir::new().unwrap();
        let old = "a".repeat(64 * 1024);
        let new = "b".repeat(64 * 1024);
        let path = write(temp.path(), "main", &old);
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(1));

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        let staging = temp.path().join("main.staging");

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..50u64 {
                    let content = if i % 2 == 0 { &new } else { &old };
                    fs::write(&staging, content).unwrap();
                    touch(&staging, SystemTime::UNIX_EPOCH + Duration::from_secs(i + 2));
                    fs::rename(&staging, &path).unwrap();
                }
            });
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let source = registry.get("main", true).unwrap();
                        assert!(
                            *source == *old || *source == *new,
                            "torn read of {} bytes",
                            source.len()
                        );
                    }
                });
            }
        });

        // The last write was `old` with the newest mtime.
        assert_eq!(&*registry.get("main", true).unwrap(), old.as_str());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unchanged_file_is_not_reread() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cmd", "content");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        let before = registry.metadata("cmd").unwrap().loaded_at;
        registry.get("cmd", true).unwrap();
        let after = registry.metadata("cmd").unwrap().loaded_at;
        assert_eq!(before, after);
    }

    #[test]
    fn test_reload_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "cmd", "content");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!registry.reload("cmd"));
        assert_eq!(&*registry.get("cmd", true).unwrap(), "content");
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a", "{# Dependencies: b, c #}\nA");
        write(temp.path(), "b", "B");
        write(temp.path(), "c", "{# Dependencies: b #}\nC");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert_eq!(registry.dependencies("a"), vec!["b", "c"]);
        assert!(registry.dependencies("b").is_empty());
        assert!(registry.dependencies("missing").is_empty());
        assert_eq!(registry.dependents("b"), vec!["a", "c"]);
    }

    #[test]
    fn test_malformed_syntax_loads_but_fails_validation() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "broken", "{% if x %}unterminated");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert!(registry.get("broken", false).is_ok());

        let errors = registry.validate("broken");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Error::TemplateSyntax { .. }));
    }

    #[test]
    fn test_validate_dependency_problems() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a", "{# Dependencies: a, ghost #}\nA");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        let errors = registry.validate("a");
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], Error::SelfDependency { .. }));
        assert!(
            matches!(&errors[1], Error::UnknownDependency { dependency, .. } if dependency == "ghost")
        );

        let all = registry.validate_all().unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_metadata() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "cmd", "content");

        let registry = ComponentRegistry::new(temp.path());
        assert!(registry.metadata("cmd").is_none());

        registry.get("cmd", false).unwrap();
        let meta = registry.metadata("cmd").unwrap();
        assert_eq!(meta.path, path);
        assert_eq!(meta.disk_mtime, meta.cached_mtime);
        assert!(!meta.is_stale());
    }

    #[test]
    fn test_names_cannot_escape_root() {
        let temp = TempDir::new().unwrap();
        let registry = ComponentRegistry::new(temp.path().join("components"));
        write(temp.path(), "secret", "nope");

        assert!(!registry.exists("../secret"));
        assert!(registry.get("../secret", false).is_err());
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a", "A");

        let registry = ComponentRegistry::load(temp.path()).unwrap();
        assert_eq!(registry.len(), 1);
        registry.clear();
        assert!(registry.is_empty());
    }
}
