//! Naming conventions for different programming languages.

/// Language-specific naming conventions.
///
/// Defines how to transform command names, parameter names, and handle
/// reserved words. Each renderer crate declares one as a `const`.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform command name to type name (e.g., "hello-world" -> "HelloWorld")
    pub command_to_type: fn(&str) -> String,
    /// Transform command name to a function name (e.g., "hello-world" -> "hello_world")
    pub command_to_function: fn(&str) -> String,
    /// Transform a parameter name to a language identifier
    pub field_to_name: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.command_to_type)(name);
        self.safe_name(&transformed)
    }

    pub fn function_name(&self, name: &str) -> String {
        let transformed = (self.command_to_function)(name);
        self.safe_name(&transformed)
    }

    pub fn field_name(&self, name: &str) -> String {
        let transformed = (self.field_to_name)(name);
        self.safe_name(&transformed)
    }
}
