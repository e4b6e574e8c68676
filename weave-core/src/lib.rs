//! Core utilities and types for the weave CLI generator.
//!
//! This crate provides the casing helpers, the manifest `Version` type and the
//! file writer shared by the rest of the workspace.

mod file;
mod utils;
mod version;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// String utilities
pub use utils::{
    split_words, to_camel_case, to_kebab_case, to_pascal_case, to_screaming_snake_case,
    to_snake_case,
};
pub use version::Version;
