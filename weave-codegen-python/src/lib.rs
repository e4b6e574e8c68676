//! Python renderer for the weave CLI generator.
//!
//! Generates a click application laid out as a `src/` package with a
//! `pyproject.toml` entry point.

mod click;
mod naming;
mod renderer;
mod type_mapper;

pub use click::{ClickCommand, python_literal};
pub use naming::PYTHON_NAMING;
pub use renderer::{PythonRenderer, module_path, package_name};
pub use type_mapper::PythonTypeMapper;
