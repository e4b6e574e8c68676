//! Intermediate representation types for the weave CLI generator.
//!
//! This crate provides the language-agnostic tree every renderer consumes.
//! The types are designed to be:
//! - Language-agnostic (no Rust/Python/TypeScript-specific concerns)
//! - Serializable, so renderers can hand them straight to templates
//! - Honest about absence: unset optional fields are omitted, lists are
//!   always present

mod command;
mod ir;

pub use command::{
    Argument, Cli, CliOption, CommandTree, Literal, ParameterSource, ParameterSpec, ValueType,
};
pub use ir::{
    DEPENDENCY_CATEGORIES, FeatureConfig, FeatureRequirements, IntermediateRepresentation,
    Metadata, Project,
};
