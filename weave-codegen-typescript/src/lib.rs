//! TypeScript renderer for the weave CLI generator.
//!
//! Builds the same commander tree as the Node.js renderer, with typed
//! hook signatures and an options interface per command.

mod naming;
mod renderer;
mod type_mapper;

pub use naming::TS_NAMING;
pub use renderer::{TypeScriptRenderer, compiled_path};
pub use type_mapper::TypeScriptTypeMapper;
