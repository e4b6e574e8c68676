//! Rust-specific naming conventions.

use weave_codegen::NamingConvention;
use weave_core::{to_pascal_case, to_snake_case};

fn escape_rust_reserved(name: &str) -> String {
    match name {
        // Raw identifiers cannot spell these.
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    command_to_type: to_pascal_case,
    command_to_function: to_snake_case,
    field_to_name: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    ],
    escape_reserved: escape_rust_reserved,
};
