//! Retargetable code generation core for the weave CLI generator.
//!
//! This crate turns a parsed [`weave_manifest::Manifest`] into source files
//! for any language that has a [`Renderer`].
//!
//! # Module Organization
//!
//! - [`registry`] - On-disk component set with caching and hot reload
//! - [`lower`] - Manifest to IR transform ([`build_ir`])
//! - [`renderer`] - The [`Renderer`] trait and render context
//! - [`language`] - Naming conventions and type mapping for renderer crates
//! - [`engine`] - The [`Engine`] driving one `generate` call
//! - [`testing`] - Test utilities (feature-gated)

mod analyze;
mod cancel;
mod clock;
mod error;
mod template;

pub mod engine;
pub mod language;
pub mod lower;
pub mod registry;
pub mod renderer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cancel::CancellationToken;
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{Engine, GenerateOptions, GenerationResult, Stage};
pub use error::{ComponentError, Error, Result};
pub use language::{NamingConvention, TypeMapper};
pub use lower::build_ir;
pub use registry::{ComponentMetadata, ComponentRegistry, LoadReport};
pub use renderer::{ComponentKind, ComponentSource, Filter, RenderContext, Renderer};
pub use template::render;
