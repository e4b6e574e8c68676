//! Command tree types.

use serde::Serialize;

/// The root of the generated CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cli {
    /// Binary / entry-point name.
    pub name: String,
    /// Root help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Version shown by `--version`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Options accepted before any subcommand.
    pub options: Vec<CliOption>,
    /// Top-level commands in declaration order.
    pub commands: Vec<CommandTree>,
}

impl Cli {
    /// All commands depth-first, parents before their children.
    pub fn walk(&self) -> Vec<&CommandTree> {
        fn visit<'a>(cmd: &'a CommandTree, out: &mut Vec<&'a CommandTree>) {
            out.push(cmd);
            for child in &cmd.subcommands {
                visit(child, out);
            }
        }

        let mut out = Vec::new();
        for cmd in &self.commands {
            visit(cmd, &mut out);
        }
        out
    }

    /// Commands without subcommands; each one gets a hook.
    pub fn leaves(&self) -> Vec<&CommandTree> {
        self.walk().into_iter().filter(|c| c.is_leaf()).collect()
    }

    /// Find a command by its full path.
    pub fn find(&self, path: &[&str]) -> Option<&CommandTree> {
        let (first, rest) = path.split_first()?;
        let mut current = self.commands.iter().find(|c| c.name == *first)?;
        for segment in rest {
            current = current.subcommands.iter().find(|c| c.name == *segment)?;
        }
        Some(current)
    }

    /// Deepest nesting level (1 for a flat CLI, 0 for no commands).
    pub fn max_depth(&self) -> usize {
        self.walk().iter().map(|c| c.path.len()).max().unwrap_or(0)
    }
}

/// A command node. Groups carry `subcommands`; leaves carry a hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandTree {
    /// Command name as typed by the user.
    pub name: String,
    /// Full path from the root (e.g., `["db", "migrate"]`).
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Positional arguments, always present (possibly empty).
    pub args: Vec<Argument>,
    /// Named options, always present (possibly empty).
    pub options: Vec<CliOption>,
    /// Child commands, always present (possibly empty).
    pub subcommands: Vec<CommandTree>,
    /// `on_` + snake_case of the full path.
    pub hook_name: String,
    /// Parameters passed to the hook, arguments first, then options.
    pub parameters: Vec<ParameterSpec>,
    pub aliases: Vec<String>,
    pub hidden: bool,
}

impl CommandTree {
    /// Returns true if this command has subcommands.
    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.subcommands.is_empty()
    }

    /// Returns the handler path (e.g., "db/migrate" for nested commands).
    pub fn handler_path(&self) -> String {
        self.path.join("/")
    }
}

/// A positional argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub required: bool,
    /// Accepts more than one value (`nargs = "*"` / `"+"`).
    pub multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nargs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

/// A named option (`--name` / `-n`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub required: bool,
    /// May be given more than once.
    pub multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl CliOption {
    /// Boolean options take no value on the command line.
    pub fn is_flag(&self) -> bool {
        self.ty == ValueType::Bool
    }
}

/// Value type of an argument or option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Path,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::String,
        ValueType::Int,
        ValueType::Float,
        ValueType::Bool,
        ValueType::Path,
    ];

    /// Inverse of [`ValueType::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Path => "path",
        }
    }
}

/// A literal value declared in the manifest (defaults, feature settings).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Literal>),
}

impl Literal {
    /// Convert to a string representation suitable for code generation.
    pub fn to_code_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items
                .iter()
                .map(Literal::to_code_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Where a hook parameter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Argument,
    Option,
}

/// One parameter of a generated hook signature.
///
/// Hooks receive exactly these parameters, so generated call sites never
/// need to inspect the user's function at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// snake_case identifier used in the hook signature.
    pub name: String,
    /// Name as declared on the command line.
    pub flag: String,
    pub source: ParameterSource,
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub required: bool,
    pub multiple: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, path: &[&str], children: Vec<CommandTree>) -> CommandTree {
        CommandTree {
            name: name.into(),
            path: path.iter().map(|s| s.to_string()).collect(),
            description: None,
            args: vec![],
            options: vec![],
            subcommands: children,
            hook_name: format!("on_{}", path.join("_")),
            parameters: vec![],
            aliases: vec![],
            hidden: false,
        }
    }

    fn sample_cli() -> Cli {
        Cli {
            name: "tool".into(),
            description: None,
            version: None,
            options: vec![],
            commands: vec![
                command("hello", &["hello"], vec![]),
                command(
                    "db",
                    &["db"],
                    vec![
                        command("migrate", &["db", "migrate"], vec![]),
                        command("seed", &["db", "seed"], vec![]),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_walk_is_depth_first() {
        let cli = sample_cli();
        let names: Vec<_> = cli.walk().iter().map(|c| c.handler_path()).collect();
        assert_eq!(names, vec!["hello", "db", "db/migrate", "db/seed"]);
    }

    #[test]
    fn test_leaves_and_depth() {
        let cli = sample_cli();
        assert_eq!(cli.leaves().len(), 3);
        assert_eq!(cli.max_depth(), 2);
        assert!(cli.find(&["db", "seed"]).is_some());
        assert!(cli.find(&["db", "drop"]).is_none());
    }

    #[test]
    fn test_empty_lists_serialize() {
        let json = serde_json::to_value(command("hello", &["hello"], vec![])).unwrap();
        assert_eq!(json["args"], serde_json::json!([]));
        assert_eq!(json["options"], serde_json::json!([]));
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_literal_to_code_string() {
        assert_eq!(Literal::Int(3).to_code_string(), "3");
        assert_eq!(
            Literal::List(vec![Literal::String("a".into()), Literal::String("b".into())])
                .to_code_string(),
            "a,b"
        );
    }

    #[test]
    fn test_value_type_names_round_trip() {
        for ty in ValueType::ALL {
            assert_eq!(ValueType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(ValueType::from_name("integer"), None);
    }
}
