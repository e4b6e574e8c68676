//! Root schema for weave.toml.

use indexmap::IndexMap;
use serde::Deserialize;
use weave_core::Version;

use crate::{CliConfig, DependenciesConfig, InstallationConfig};

/// Root schema for weave.toml
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    /// Distribution / package name (e.g., `hello-cli`).
    pub package_name: String,

    /// Name users type to run the CLI.
    pub command_name: String,

    pub display_name: Option<String>,

    pub description: Option<String>,

    pub version: Option<Version>,

    pub author: Option<String>,

    pub license: Option<String>,

    /// Single target language.
    pub language: Option<String>,

    /// Several target languages.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Override for the generated entry-point path.
    pub cli_path: Option<String>,

    /// Override for the generated hooks path.
    pub hooks_path: Option<String>,

    pub cli: Option<CliConfig>,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    pub installation: Option<InstallationConfig>,

    /// Feature tables, `[features.<name>]`
    #[serde(default)]
    pub features: IndexMap<String, FeatureTable>,

    /// Extra crates for the Rust target, `name = "version"` or a table.
    #[serde(default)]
    pub rust_crates: IndexMap<String, toml::Value>,

    /// File the manifest was read from, set by the parse functions.
    #[serde(skip)]
    pub source_name: Option<String>,
}

impl Manifest {
    /// Target languages: `language` first, then `languages`, without repeats.
    pub fn targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = Vec::new();
        for lang in self.language.iter().chain(self.languages.iter()) {
            if !targets.contains(lang) {
                targets.push(lang.clone());
            }
        }
        targets
    }

    /// The `[cli]` name, falling back to `command_name`.
    pub fn cli_name(&self) -> &str {
        self.cli
            .as_ref()
            .and_then(|cli| cli.name.as_deref())
            .unwrap_or(&self.command_name)
    }
}

/// One `[features.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureTable {
    pub enabled: Option<bool>,

    /// Every other key in the table.
    #[serde(flatten)]
    pub settings: IndexMap<String, toml::Value>,
}
