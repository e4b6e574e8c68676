//! Build operation - render every requested language and persist the files.

use std::{
    path::{Path, PathBuf},
    thread,
};

use eyre::{Context, Result};
use weave_codegen::{CancellationToken, Engine, GenerateOptions, GenerationResult, build_ir};
use weave_core::{File, FileRules, Overwrite, WriteResult};
use weave_manifest::Manifest;

use crate::{
    languages::{EXECUTABLE_COMPONENTS, USER_OWNED_SUFFIX},
    reports::{BuildReport, FileOutcome, LanguageOutcome, PreviewFile},
};

/// Options for the build operation.
pub struct BuildOptions<'a> {
    pub languages: &'a [String],
    /// Root every generated path is joined onto.
    pub output_dir: &'a Path,
    /// Collect file contents instead of writing them.
    pub dry_run: bool,
    /// Treat every file as user-owned.
    pub no_clobber: bool,
    pub auto_reload: bool,
    pub cancel: CancellationToken,
}

/// Generate every language in parallel, then write the results.
///
/// Fatal errors for one language (unknown language, bad manifest) are
/// recorded on that language's outcome; the other languages continue.
pub fn build(engine: &Engine, manifest: &Manifest, opts: BuildOptions) -> Result<BuildReport> {
    let generate = GenerateOptions {
        auto_reload: opts.auto_reload,
        dependency_order: false,
        cancel: Some(opts.cancel.clone()),
    };

    let output_dir = opts.output_dir;
    let results: Vec<(String, weave_codegen::Result<GenerationResult>)> = thread::scope(|s| {
        let handles: Vec<_> = opts
            .languages
            .iter()
            .map(|language| {
                let generate = &generate;
                s.spawn(move || {
                    let result = engine.generate_with(manifest, language, output_dir, generate);
                    (language.clone(), result)
                })
            })
            .collect();
        handles
            .into_iter()
            .zip(opts.languages)
            .map(|(handle, language)| match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => (
                    language.clone(),
                    Err(weave_codegen::Error::config(format!(
                        "renderer for '{language}' panicked"
                    ))),
                ),
            })
            .collect()
    });

    let mut report = BuildReport {
        cli_name: manifest.cli_name().to_string(),
        version: manifest.version.as_ref().map(ToString::to_string),
        dry_run: opts.dry_run,
        languages: Vec::new(),
    };

    for (language, result) in results {
        let outcome = match result {
            Ok(result) => {
                let rules =
                    file_rules(engine, manifest, &language, opts.output_dir, opts.no_clobber);
                persist(result, &rules, opts.dry_run)?
            }
            Err(err) => LanguageOutcome {
                language,
                fatal: Some(err.to_string()),
                ..Default::default()
            },
        };
        report.languages.push(outcome);
    }

    Ok(report)
}

/// Write rules keyed by destination path, derived from the component that
/// produces each file.
fn file_rules(
    engine: &Engine,
    manifest: &Manifest,
    language: &str,
    output_dir: &Path,
    no_clobber: bool,
) -> Vec<(PathBuf, FileRules)> {
    let (Some(renderer), Ok(ir)) = (engine.renderer(language), build_ir(manifest)) else {
        return Vec::new();
    };
    renderer
        .output_structure(&ir)
        .into_iter()
        .map(|(component, relative)| {
            let overwrite = if no_clobber || component.ends_with(USER_OWNED_SUFFIX) {
                Overwrite::IfMissing
            } else {
                Overwrite::Always
            };
            let rules = FileRules {
                overwrite,
                executable: EXECUTABLE_COMPONENTS.contains(&component.as_str()),
            };
            (output_dir.join(relative), rules)
        })
        .collect()
}

fn persist(
    result: GenerationResult,
    rules: &[(PathBuf, FileRules)],
    dry_run: bool,
) -> Result<LanguageOutcome> {
    let canceled = result.is_canceled();
    let mut outcome = LanguageOutcome {
        language: result.language,
        errors: result.errors.iter().map(ToString::to_string).collect(),
        canceled,
        ..Default::default()
    };

    for (path, content) in result.files {
        if dry_run {
            outcome.preview.push(PreviewFile {
                path: path.display().to_string(),
                content,
            });
            continue;
        }

        let rules = rules
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, rules)| rules.clone())
            .unwrap_or_default();
        let file = File::new(&path, content).with_rules(rules);
        let written = file
            .write()
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        match written {
            WriteResult::Written => tracing::info!(path = %path.display(), "written"),
            WriteResult::Skipped => tracing::warn!(path = %path.display(), "exists, not overwritten"),
        }
        outcome.files.push(FileOutcome {
            path,
            skipped: written == WriteResult::Skipped,
        });
    }

    Ok(outcome)
}
