use std::path::PathBuf;

use clap::{Args, Subcommand};
use eyre::Result;
use weave_codegen::ComponentRegistry;

use super::DEFAULT_COMPONENTS_DIR;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ComponentsCommand {
    /// Directory holding the .j2 components
    #[arg(long, env = "WEAVE_COMPONENTS", default_value = DEFAULT_COMPONENTS_DIR, global = true)]
    pub components: PathBuf,

    #[command(subcommand)]
    pub action: Option<ComponentsAction>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum ComponentsAction {
    /// List components with their declared dependencies (default)
    List,
    /// Validate syntax and dependencies of every component
    Check,
}

impl ComponentsCommand {
    pub fn run(&self) -> Result<()> {
        let registry = ComponentRegistry::new(&self.components);
        match self.action.unwrap_or(ComponentsAction::List) {
            ComponentsAction::List => {
                let report = ops::list_components(&registry)?;
                report.render(&mut TerminalOutput::new());
            }
            ComponentsAction::Check => {
                let report = ops::check_components(&registry)?;
                report.render(&mut TerminalOutput::new());
                if !report.is_valid() {
                    std::process::exit(1);
                }
            }
        }
        Ok(())
    }
}
