use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};

use chrono::{DateTime, Utc};

use super::directive::parse_dependencies;
use crate::{Error, Result};

/// A template fragment loaded from disk.
///
/// Immutable once built: a reload produces a new `Component` that replaces
/// the old one in the registry.
#[derive(Debug)]
pub struct Component {
    name: String,
    source: Arc<str>,
    dependencies: Vec<String>,
    path: PathBuf,
    mtime: Option<SystemTime>,
    loaded_at: DateTime<Utc>,
}

impl Component {
    /// Read `path` and parse its dependency directive.
    pub(crate) fn read(name: &str, path: &Path) -> Result<Self> {
        Self::read_with(name, path, |p| std::fs::read_to_string(p))
    }

    /// The mtime is taken before the content, so a write racing the read
    /// leaves the entry stale rather than pairing old text with a new mtime.
    fn read_with(
        name: &str,
        path: &Path,
        read: impl FnOnce(&Path) -> io::Result<String>,
    ) -> Result<Self> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        let source = read(path).map_err(io_err)?;
        Ok(Self::from_parts(name, source, path.to_path_buf(), mtime))
    }

    pub(crate) fn from_parts(
        name: &str,
        source: String,
        path: PathBuf,
        mtime: Option<SystemTime>,
    ) -> Self {
        let mut dependencies = parse_dependencies(&source);
        if dependencies.iter().any(|d| d == name) {
            tracing::warn!(component = name, "ignoring self dependency");
            dependencies.retain(|d| d != name);
        }

        Self {
            name: name.to_string(),
            source: Arc::from(source),
            dependencies,
            path,
            mtime,
            loaded_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text.
    pub fn source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    /// Declared dependencies, self references removed.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the file when it was read.
    pub fn mtime(&self) -> Option<SystemTime> {
        self.mtime
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// True when the backing file exists and its mtime differs from the
    /// cached one. A deleted file is never stale.
    pub fn is_stale(&self) -> bool {
        match std::fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(disk) => Some(disk) != self.mtime,
            Err(_) => false,
        }
    }
}

/// Snapshot of a component's cache state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub path: PathBuf,
    /// Current mtime on disk, `None` if the file is gone.
    pub disk_mtime: Option<SystemTime>,
    /// Mtime recorded when the cached copy was read.
    pub cached_mtime: Option<SystemTime>,
    pub loaded_at: DateTime<Utc>,
}

impl ComponentMetadata {
    pub fn is_stale(&self) -> bool {
        self.disk_mtime.is_some() && self.disk_mtime != self.cached_mtime
    }
}

/// Outcome of [`ComponentRegistry::load_all`](super::ComponentRegistry::load_all).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Components read from disk.
    pub loaded: Vec<String>,
    /// Components already cached and left untouched.
    pub skipped: Vec<String>,
}
