//! TypeScript-specific naming conventions.

use weave_codegen::NamingConvention;
use weave_core::{to_camel_case, to_pascal_case};

fn escape_ts_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// TypeScript naming conventions.
pub const TS_NAMING: NamingConvention = NamingConvention {
    // Types use PascalCase
    command_to_type: to_pascal_case,
    // Functions and fields use camelCase
    command_to_function: to_camel_case,
    field_to_name: to_camel_case,
    reserved_words: &[
        // JavaScript reserved words
        "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
        "finally", "for", "function", "if", "implements", "import", "in", "instanceof",
        "interface", "let", "new", "null", "package", "private", "protected", "public", "return",
        "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void",
        "while", "with", "yield",
        // TypeScript type names a parameter should not shadow
        "any", "boolean", "never", "number", "object", "string", "symbol", "undefined",
        "unknown",
    ],
    escape_reserved: escape_ts_reserved,
};
