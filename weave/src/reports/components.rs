//! Components command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ComponentsReport {
    pub root: PathBuf,
    /// Whether validation ran; `errors` are empty otherwise.
    pub checked: bool,
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug)]
pub struct ComponentEntry {
    pub name: String,
    pub dependencies: Vec<String>,
    pub errors: Vec<String>,
}

impl ComponentsReport {
    pub fn is_valid(&self) -> bool {
        self.components.iter().all(|c| c.errors.is_empty())
    }
}

impl Report for ComponentsReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Components", &self.root.display().to_string());

        if self.components.is_empty() {
            out.warning(&format!("no components found in {}", self.root.display()));
            return;
        }

        out.newline();
        for component in &self.components {
            if component.dependencies.is_empty() {
                out.list_item(&component.name);
            } else {
                out.list_item(&format!(
                    "{} (depends on {})",
                    component.name,
                    component.dependencies.join(", ")
                ));
            }
            for error in &component.errors {
                out.error_item(error);
            }
        }

        if self.checked {
            let failing = self
                .components
                .iter()
                .filter(|c| !c.errors.is_empty())
                .count();
            out.newline();
            if failing == 0 {
                out.preformatted(&format!("All {} components are valid", self.components.len()));
            } else {
                out.preformatted(&format!(
                    "{} of {} components have problems",
                    failing,
                    self.components.len()
                ));
            }
        }
    }
}
