mod build;
mod components;
mod completions;

use build::BuildCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use components::ComponentsCommand;
use eyre::Result;

/// Default location of the component tree, relative to the working directory.
pub(crate) const DEFAULT_COMPONENTS_DIR: &str = "components";

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for weave_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "weave")]
#[command(version)]
#[command(about = "Generate CLI applications in several languages from one TOML manifest")]
pub(crate) struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Components(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a CLI from weave.toml
    Build(BuildCommand),

    /// Inspect the component tree
    Components(ComponentsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["weave", "-vv", "components"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
