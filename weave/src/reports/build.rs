//! Build command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Everything one `weave build` run produced.
#[derive(Debug)]
pub struct BuildReport {
    pub cli_name: String,
    pub version: Option<String>,
    pub dry_run: bool,
    /// One entry per requested language, in request order.
    pub languages: Vec<LanguageOutcome>,
}

#[derive(Debug, Default)]
pub struct LanguageOutcome {
    pub language: String,
    /// Set when the language produced no output at all.
    pub fatal: Option<String>,
    /// Per-component failures, already formatted.
    pub errors: Vec<String>,
    pub canceled: bool,
    pub files: Vec<FileOutcome>,
    /// Rendered files, filled only in dry-run mode.
    pub preview: Vec<PreviewFile>,
}

impl LanguageOutcome {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none() && self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// The file existed and is user-owned.
    pub skipped: bool,
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.languages.iter().filter(|l| l.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.succeeded() == self.languages.len()
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.version {
            Some(version) => out.title(&format!("{} v{}", self.cli_name, version)),
            None => out.title(&self.cli_name),
        }

        for outcome in &self.languages {
            out.newline();
            render_language(out, outcome, self.dry_run);
        }

        out.newline();
        out.key_value(
            "Summary",
            &format!(
                "{} of {} languages succeeded",
                self.succeeded(),
                self.languages.len()
            ),
        );
    }
}

fn render_language(out: &mut dyn Output, outcome: &LanguageOutcome, dry_run: bool) {
    out.section(&outcome.language);

    if let Some(fatal) = &outcome.fatal {
        out.error_item(fatal);
        return;
    }

    if dry_run {
        for file in &outcome.preview {
            out.divider(&file.path);
            out.preformatted(file.content.trim_end());
        }
    } else {
        for file in &outcome.files {
            let path = file.path.display().to_string();
            if file.skipped {
                out.kept_item(&format!("{path} (exists, kept)"));
            } else {
                out.added_item(&path);
            }
        }
    }

    for error in &outcome.errors {
        out.error_item(error);
    }
    if outcome.canceled {
        out.warning(&format!("{}: generation canceled", outcome.language));
    }
}
