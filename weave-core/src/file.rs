use std::path::{Path, PathBuf};

use eyre::{Context, Result};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A generated file ready to be persisted
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        if self.rules.overwrite == Overwrite::IfMissing && self.exists() {
            return Ok(WriteResult::Skipped);
        }

        write_file(&self.path, &self.content)?;
        if self.rules.executable {
            set_executable(&self.path)?;
        }
        Ok(WriteResult::Written)
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Mark the file executable after writing (no-op off unix).
    pub executable: bool,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if file doesn't exist (stubs)
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated");
        let result = file.write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new.txt");

        let file = File::new(&path, "new content").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
            executable: false,
        });
        let result = file.write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");

        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "should not write").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
            executable: false,
        });
        let result = file.write().unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_write_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cli.js");

        let file = File::new(&path, "#!/usr/bin/env node\n").with_rules(FileRules {
            overwrite: Overwrite::Always,
            executable: true,
        });
        file.write().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        let file = File::new(&path, "content");
        assert!(!file.exists());

        fs::write(&path, "content").unwrap();
        assert!(file.exists());
    }
}
