//! TypeScript type mapper implementation.

use weave_codegen::TypeMapper;
use weave_ir::ValueType;

/// TypeScript type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn map_type(&self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::String => "string",
            ValueType::Int => "number",
            ValueType::Float => "number",
            ValueType::Bool => "boolean",
            ValueType::Path => "string",
        }
    }

    fn map_optional_type(&self, ty: ValueType) -> String {
        format!("{} | undefined", self.map_type(ty))
    }

    fn map_list_type(&self, ty: ValueType) -> String {
        format!("{}[]", self.map_type(ty))
    }
}
