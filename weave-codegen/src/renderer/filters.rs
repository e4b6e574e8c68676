//! Filters every renderer gets.

use std::collections::BTreeMap;

use weave_core::{
    to_camel_case, to_kebab_case, to_pascal_case, to_screaming_snake_case, to_snake_case,
};

use super::Filter;

/// Casing filters plus `quote`, shared by all languages. Renderer filters
/// with the same name take precedence.
pub fn common_filters() -> BTreeMap<&'static str, Filter> {
    BTreeMap::from([
        ("snake_case", to_snake_case as Filter),
        ("camel_case", to_camel_case as Filter),
        ("pascal_case", to_pascal_case as Filter),
        ("kebab_case", to_kebab_case as Filter),
        ("screaming_snake_case", to_screaming_snake_case as Filter),
        ("quote", quote as Filter),
    ])
}

/// Double-quoted string literal with JSON escapes, which Python,
/// JavaScript and TOML all accept.
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
