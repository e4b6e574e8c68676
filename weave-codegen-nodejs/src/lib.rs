//! Node.js renderer for the weave CLI generator.
//!
//! Generates an ES module CLI on commander. The [`commander`] view is public
//! so the TypeScript renderer can build the same tree with typed
//! signatures.

pub mod commander;
mod naming;
mod renderer;
mod type_mapper;

pub use naming::{JS_NAMING, JS_RESERVED};
pub use renderer::NodeRenderer;
pub use type_mapper::JsDocTypeMapper;
