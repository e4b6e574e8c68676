//! Language-specific abstractions shared by the renderer crates.
//!
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`TypeMapper`] - Trait for mapping IR value types to language types

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::TypeMapper;
