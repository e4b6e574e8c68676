//! Python-specific naming conventions.

use weave_codegen::NamingConvention;
use weave_core::{to_pascal_case, to_snake_case};

fn escape_python_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Python naming conventions (PEP 8).
pub const PYTHON_NAMING: NamingConvention = NamingConvention {
    command_to_type: to_pascal_case,
    command_to_function: to_snake_case,
    field_to_name: to_snake_case,
    reserved_words: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
        // Builtins a generated signature would shadow
        "help", "id", "input", "type", "format", "list", "dict", "hash", "min", "max", "open",
    ],
    escape_reserved: escape_python_reserved,
};
