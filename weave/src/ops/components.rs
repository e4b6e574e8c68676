//! Components operations - inspect and validate the component tree.

use eyre::{Context, Result};
use weave_codegen::ComponentRegistry;

use crate::reports::{ComponentEntry, ComponentsReport};

/// Load every component and describe it.
pub fn list_components(registry: &ComponentRegistry) -> Result<ComponentsReport> {
    registry
        .load_all(false)
        .wrap_err("Failed to load components")?;

    let components = registry
        .names()
        .into_iter()
        .map(|name| ComponentEntry {
            dependencies: registry.dependencies(&name),
            errors: Vec::new(),
            name,
        })
        .collect();

    Ok(ComponentsReport {
        root: registry.root().to_path_buf(),
        checked: false,
        components,
    })
}

/// Validate syntax and declared dependencies of every component.
pub fn check_components(registry: &ComponentRegistry) -> Result<ComponentsReport> {
    let mut report = list_components(registry)?;
    let failures = registry
        .validate_all()
        .wrap_err("Failed to validate components")?;

    for entry in &mut report.components {
        if let Some(errors) = failures.get(&entry.name) {
            entry.errors = errors.iter().map(ToString::to_string).collect();
        }
    }
    report.checked = true;
    Ok(report)
}
