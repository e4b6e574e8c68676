//! Rust renderer for the weave CLI generator.
//!
//! Generates a binary crate built on clap's derive API: `src/main.rs` holds
//! the parser types and dispatch, `src/hooks.rs` one function per leaf
//! command.

mod clap;
mod naming;
mod renderer;
mod type_mapper;

pub use clap::{ClapCommand, ClapField, ClapVariant};
pub use naming::RUST_NAMING;
pub use renderer::RustRenderer;
pub use type_mapper::RustTypeMapper;
