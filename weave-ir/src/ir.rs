//! Top-level intermediate representation.
//!
//! # Architecture
//!
//! ```text
//! weave.toml → Manifest (parsing) → IntermediateRepresentation (lowering) → Renderer
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Cli, Literal};

/// Dependency categories every IR carries, even when empty.
pub const DEPENDENCY_CATEGORIES: [&str; 4] = ["npm", "python", "rust", "system"];

/// Language-agnostic description of one CLI, consumed by every renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntermediateRepresentation {
    pub project: Project,
    pub cli: Cli,
    /// Packages per category (`python`, `npm`, `rust`, `system`).
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub features: BTreeMap<String, FeatureConfig>,
    pub requirements: FeatureRequirements,
    pub metadata: Metadata,
}

impl IntermediateRepresentation {
    /// Packages for one category; empty when the category is unknown.
    pub fn dependencies_for(&self, category: &str) -> &[String] {
        self.dependencies
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).is_some_and(FeatureConfig::is_enabled)
    }
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name users type to run the CLI.
    pub command_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Override for the generated entry-point path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli_path: Option<String>,
    /// Override for the generated hooks path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks_path: Option<String>,
}

/// An optional feature declared in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub settings: BTreeMap<String, Literal>,
}

impl FeatureConfig {
    /// A declared feature is on unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Shape analysis of the command tree, for renderers that scale their output
/// to what the CLI actually needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureRequirements {
    /// Number of commands at every depth.
    pub command_count: usize,
    /// Number of commands that get a hook.
    pub leaf_count: usize,
    pub max_depth: usize,
    /// Any command has subcommands.
    pub subcommand_nesting: bool,
    /// Variadic values, choices, or more than a handful of parameters.
    pub complex_parsing: bool,
    /// Any parameter is a path.
    pub file_operations: bool,
    pub interactive_mode: bool,
    pub global_options: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    /// Manifest file the IR was built from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_filename: Option<String>,
    pub generator_version: String,
}
