//! Operations behind the subcommands. Each returns a report and leaves
//! printing to the caller.

mod build;
mod components;

pub use build::{BuildOptions, build};
pub use components::{check_components, list_components};
