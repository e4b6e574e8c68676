//! Ordering components by their declared dependencies.

use std::collections::HashMap;

use super::ComponentRegistry;
use crate::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl ComponentRegistry {
    /// Order `names` so every component comes after the components it
    /// declares, keeping the input order otherwise.
    ///
    /// Dependencies outside `names` are followed to detect cycles but are not
    /// part of the result.
    pub fn dependency_order(&self, names: &[String]) -> Result<Vec<String>> {
        let mut marks: HashMap<String, Mark> = HashMap::new();
        let mut stack: Vec<String> = Vec::new();
        let mut postorder: Vec<String> = Vec::new();

        for name in names {
            self.visit(name, &mut marks, &mut stack, &mut postorder)?;
        }

        Ok(postorder
            .into_iter()
            .filter(|name| names.contains(name))
            .collect())
    }

    fn visit(
        &self,
        name: &str,
        marks: &mut HashMap<String, Mark>,
        stack: &mut Vec<String>,
        postorder: &mut Vec<String>,
    ) -> Result<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle = stack[start..].to_vec();
                cycle.push(name.to_string());
                return Err(Error::DependencyCycle { cycle });
            }
            None => {}
        }

        marks.insert(name.to_string(), Mark::Visiting);
        stack.push(name.to_string());
        for dependency in self.dependencies(name) {
            self.visit(&dependency, marks, stack, postorder)?;
        }
        stack.pop();
        marks.insert(name.to_string(), Mark::Done);
        postorder.push(name.to_string());
        Ok(())
    }
}
