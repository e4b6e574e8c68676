//! JavaScript naming conventions.

use weave_codegen::NamingConvention;
use weave_core::{to_camel_case, to_pascal_case};

fn escape_js_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// Reserved words of ECMAScript, strict mode included.
pub const JS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

pub const JS_NAMING: NamingConvention = NamingConvention {
    command_to_type: to_pascal_case,
    command_to_function: to_camel_case,
    field_to_name: to_camel_case,
    reserved_words: JS_RESERVED,
    escape_reserved: escape_js_reserved,
};
