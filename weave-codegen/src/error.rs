//! Error taxonomy for component loading and generation.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The configuration cannot be turned into an IR.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(weave::config))]
    Config { message: String },

    #[error("component '{name}' not found")]
    #[diagnostic(
        code(weave::component_not_found),
        help("add '{name}.j2' to the components directory")
    )]
    ComponentNotFound { name: String },

    #[error("syntax error in component '{name}'{}: {message}", line_suffix(.line))]
    #[diagnostic(code(weave::template_syntax))]
    TemplateSyntax {
        name: String,
        line: Option<usize>,
        message: String,
    },

    /// The template parsed but failed while rendering.
    #[error("failed to render component '{name}'{}: {message}", line_suffix(.line))]
    #[diagnostic(code(weave::render))]
    Render {
        name: String,
        line: Option<usize>,
        message: String,
    },

    #[error("no renderer registered for language '{language}'")]
    #[diagnostic(
        code(weave::renderer_not_registered),
        help("available renderers: {available}")
    )]
    RendererNotRegistered {
        language: String,
        /// Comma-separated list of registered languages.
        available: String,
    },

    #[error("a renderer for language '{language}' is already registered")]
    #[diagnostic(
        code(weave::renderer_already_registered),
        help("use register_renderer_override to replace it")
    )]
    RendererAlreadyRegistered { language: String },

    #[error("renderer language cannot be empty")]
    #[diagnostic(code(weave::empty_language))]
    EmptyLanguage,

    #[error("dependency cycle: {}", .cycle.join(" -> "))]
    #[diagnostic(code(weave::dependency_cycle))]
    DependencyCycle { cycle: Vec<String> },

    #[error("component '{name}' declares itself as a dependency")]
    #[diagnostic(code(weave::self_dependency))]
    SelfDependency { name: String },

    #[error("component '{name}' depends on unknown component '{dependency}'")]
    #[diagnostic(code(weave::unknown_dependency))]
    UnknownDependency { name: String, dependency: String },

    #[error("component '{name}' maps to '{path}', which is outside the destination root")]
    #[diagnostic(
        code(weave::unsafe_output_path),
        help("output paths must be relative and cannot contain '..'")
    )]
    UnsafeOutputPath { name: String, path: String },

    #[error("component '{name}' writes to '{}', already claimed by '{owner}'", .path.display())]
    #[diagnostic(code(weave::output_path_conflict))]
    OutputPathConflict {
        name: String,
        path: PathBuf,
        /// Component that claimed the path first.
        owner: String,
    },

    #[error("generation canceled")]
    #[diagnostic(code(weave::canceled))]
    Canceled,

    #[error("failed to read '{path}'")]
    #[diagnostic(code(weave::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {})", l)).unwrap_or_default()
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Turn a minijinja error into a syntax or render error for `name`.
    pub(crate) fn from_template(name: &str, err: &minijinja::Error) -> Self {
        let message = match err.detail() {
            Some(detail) => format!("{}: {}", err.kind(), detail),
            None => err.kind().to_string(),
        };
        match err.kind() {
            minijinja::ErrorKind::SyntaxError => Self::TemplateSyntax {
                name: name.to_string(),
                line: err.line(),
                message,
            },
            _ => Self::Render {
                name: name.to_string(),
                line: err.line(),
                message,
            },
        }
    }

    /// Fatal errors abort a generation before any output is produced.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::RendererNotRegistered { .. } | Self::DependencyCycle { .. }
        )
    }
}

/// A failure attached to one component of one target language.
#[derive(Debug, Error)]
#[error("[{language}] {component}: {error}")]
pub struct ComponentError {
    pub component: String,
    pub language: String,
    #[source]
    pub error: Error,
}

impl ComponentError {
    pub fn new(component: impl Into<String>, language: impl Into<String>, error: Error) -> Self {
        Self {
            component: component.into(),
            language: language.into(),
            error,
        }
    }
}
