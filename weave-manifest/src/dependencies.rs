//! `[dependencies]` and `[installation]` sections.

use serde::Deserialize;

/// Runtime requirements of the generated CLI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DependenciesConfig {
    #[serde(default)]
    pub required: Vec<Dependency>,
    #[serde(default)]
    pub optional: Vec<Dependency>,
}

impl DependenciesConfig {
    /// Required entries first, then optional ones.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.required.iter().chain(self.optional.iter())
    }
}

/// A dependency written either as a bare name or as a table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    /// A bare name is an external command (`"git"`).
    Name(String),
    Detailed {
        name: String,
        #[serde(rename = "type", default)]
        kind: DependencyKind,
    },
}

impl Dependency {
    pub fn name(&self) -> &str {
        match self {
            Dependency::Name(name) | Dependency::Detailed { name, .. } => name,
        }
    }

    pub fn kind(&self) -> DependencyKind {
        match self {
            Dependency::Name(_) => DependencyKind::Command,
            Dependency::Detailed { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// An executable expected on `PATH`.
    #[default]
    Command,
    /// An OS package (apt, brew, ...).
    #[serde(alias = "system")]
    SystemPackage,
    Python,
    Npm,
    Rust,
}

impl DependencyKind {
    /// IR dependency category this kind aggregates into.
    pub fn category(&self) -> &'static str {
        match self {
            DependencyKind::Command | DependencyKind::SystemPackage => "system",
            DependencyKind::Python => "python",
            DependencyKind::Npm => "npm",
            DependencyKind::Rust => "rust",
        }
    }
}

/// The `[installation]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstallationConfig {
    /// Distribution name when it differs from `package_name`.
    pub pypi_name: Option<String>,

    #[serde(default)]
    pub extras: Extras,
}

/// Extra packages per ecosystem, `[installation.extras]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub python: Vec<String>,
    #[serde(default)]
    pub npm: Vec<String>,
    #[serde(default)]
    pub apt: Vec<String>,
    #[serde(default)]
    pub cargo: Vec<String>,
}

impl Extras {
    /// `(category, packages)` pairs in the IR's category vocabulary.
    pub fn by_category(&self) -> [(&'static str, &[String]); 4] {
        [
            ("python", self.python.as_slice()),
            ("npm", self.npm.as_slice()),
            ("system", self.apt.as_slice()),
            ("rust", self.cargo.as_slice()),
        ]
    }
}
