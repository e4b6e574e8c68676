//! Rust type mapper implementation.

use weave_codegen::TypeMapper;
use weave_ir::ValueType;

/// Rust type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn map_type(&self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::String => "String",
            ValueType::Int => "i64",
            ValueType::Float => "f64",
            ValueType::Bool => "bool",
            ValueType::Path => "std::path::PathBuf",
        }
    }

    fn map_optional_type(&self, ty: ValueType) -> String {
        format!("Option<{}>", self.map_type(ty))
    }

    fn map_list_type(&self, ty: ValueType) -> String {
        format!("Vec<{}>", self.map_type(ty))
    }
}
