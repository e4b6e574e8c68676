use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Bundles the manifest text and its filename so validation code can build
/// spanned diagnostics without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Best-effort span of the first quoted or bare occurrence of `name`.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", name);
        if let Some(offset) = self.src.find(&quoted) {
            return Some(SourceSpan::from((offset + 1, name.len())));
        }
        self.src
            .find(name)
            .map(|offset| SourceSpan::from((offset, name.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `needle` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, needle: Option<&str>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: needle.and_then(|n| self.find_span(n)),
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: self.find_span(&name),
            name,
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate short flag error.
    pub fn duplicate_short_flag_error(
        &self,
        short: char,
        command: impl Into<String>,
        first_flag: impl Into<String>,
        second_flag: impl Into<String>,
    ) -> Box<Error> {
        let second_flag = second_flag.into();
        Box::new(Error::DuplicateShortFlag {
            src: self.named_source(),
            span: self.find_span(&second_flag),
            short,
            command: command.into(),
            first_flag: first_flag.into(),
            second_flag,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path of an existing weave.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest")]
    #[diagnostic(code(weave::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate short flag '-{short}' in '{command}'")]
    #[diagnostic(
        code(weave::duplicate_flag),
        help("'{first_flag}' already uses '-{short}'; choose another short flag for '{second_flag}'")
    )]
    DuplicateShortFlag {
        #[source_code]
        src: NamedSource<String>,
        #[label("conflicting option")]
        span: Option<SourceSpan>,
        short: char,
        command: String,
        first_flag: String,
        second_flag: String,
    },

    #[error("{message}")]
    #[diagnostic(code(weave::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(weave::invalid_identifier),
        help("{reason}. Use letters, digits, '-' and '_', starting with a letter.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid name")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },
}
