use std::path::PathBuf;

use clap::Args;
use eyre::{Result, bail};
use weave_codegen::CancellationToken;

use super::{DEFAULT_COMPONENTS_DIR, UnwrapOrExit};
use crate::{
    languages,
    ops::{self, BuildOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Path to weave.toml
    #[arg(default_value = weave_manifest::MANIFEST_FILENAME)]
    pub config: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Target language; repeat for several (overrides weave.toml)
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Directory holding the .j2 components
    #[arg(long, env = "WEAVE_COMPONENTS", default_value = DEFAULT_COMPONENTS_DIR)]
    pub components: PathBuf,

    /// Print generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Never replace files that already exist
    #[arg(long)]
    pub no_clobber: bool,

    /// Re-read components that changed on disk while rendering
    #[arg(long)]
    pub auto_reload: bool,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = weave_manifest::parse_file(&self.config).unwrap_or_exit();

        let languages = if self.languages.is_empty() {
            manifest.targets()
        } else {
            self.languages.clone()
        };
        if languages.is_empty() {
            bail!(
                "no target language: pass --language or set `language` in {}",
                self.config.display()
            );
        }

        let engine = languages::engine(&self.components)?;
        let report = ops::build(
            &engine,
            &manifest,
            BuildOptions {
                languages: &languages,
                output_dir: &self.output,
                dry_run: self.dry_run,
                no_clobber: self.no_clobber,
                auto_reload: self.auto_reload,
                cancel: CancellationToken::new(),
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
