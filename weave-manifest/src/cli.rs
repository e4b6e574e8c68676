//! `[cli]` section: commands, arguments and options.

use indexmap::IndexMap;
use serde::Deserialize;

/// The `[cli]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CliConfig {
    /// Binary name (falls back to the top-level `command_name`).
    pub name: Option<String>,

    /// One-line summary shown at the top of `--help`.
    pub tagline: Option<String>,

    #[serde(alias = "desc")]
    pub description: Option<String>,

    pub version: Option<String>,

    /// Options accepted before any subcommand
    #[serde(default)]
    pub options: Vec<OptionConfig>,

    /// Top-level commands, in declaration order
    #[serde(default)]
    pub commands: IndexMap<String, CommandConfig>,
}

/// A command or subcommand
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommandConfig {
    #[serde(alias = "desc")]
    pub description: Option<String>,

    /// Positional arguments, `[[cli.commands.<name>.args]]`
    #[serde(default)]
    pub args: Vec<ArgConfig>,

    /// Named options, `[[cli.commands.<name>.options]]`
    #[serde(default)]
    pub options: Vec<OptionConfig>,

    /// Nested subcommands
    #[serde(default, alias = "commands")]
    pub subcommands: IndexMap<String, CommandConfig>,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub hidden: bool,
}

impl CommandConfig {
    /// Returns true if this command has subcommands
    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }
}

/// A positional argument
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArgConfig {
    pub name: String,

    #[serde(alias = "desc")]
    pub description: Option<String>,

    #[serde(rename = "type", default)]
    pub arg_type: ArgType,

    #[serde(default = "default_true")]
    pub required: bool,

    /// Value count: an integer or one of `?`, `*`, `+`
    pub nargs: Option<Nargs>,

    pub default: Option<toml::Value>,

    pub choices: Option<Vec<String>>,
}

impl ArgConfig {
    /// True when the argument collects more than one value.
    pub fn is_variadic(&self) -> bool {
        self.nargs.as_ref().is_some_and(Nargs::is_variadic)
    }
}

fn default_true() -> bool {
    true
}

/// A named option
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionConfig {
    pub name: String,

    /// Short flag character (e.g., 'v' for -v)
    pub short: Option<char>,

    #[serde(alias = "desc")]
    pub description: Option<String>,

    #[serde(rename = "type", default)]
    pub option_type: ArgType,

    #[serde(default)]
    pub required: bool,

    /// May be repeated on the command line
    #[serde(default)]
    pub multiple: bool,

    pub default: Option<toml::Value>,

    pub choices: Option<Vec<String>>,
}

/// `nargs` as written in the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Nargs {
    Count(u32),
    Pattern(String),
}

impl Nargs {
    pub fn is_variadic(&self) -> bool {
        match self {
            Nargs::Count(n) => *n > 1,
            Nargs::Pattern(p) => p == "*" || p == "+",
        }
    }
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nargs::Count(n) => write!(f, "{}", n),
            Nargs::Pattern(p) => f.write_str(p),
        }
    }
}

/// Supported argument types. Common spellings from other tools are accepted.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    #[default]
    #[serde(alias = "str", alias = "text")]
    String,
    #[serde(alias = "integer")]
    Int,
    #[serde(alias = "number")]
    Float,
    #[serde(alias = "boolean", alias = "flag")]
    Bool,
    #[serde(alias = "file", alias = "dir")]
    Path,
}

impl ArgType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Bool => "bool",
            ArgType::Path => "path",
        }
    }
}
