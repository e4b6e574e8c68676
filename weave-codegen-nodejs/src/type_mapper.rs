//! JSDoc types for hook documentation.

use weave_codegen::TypeMapper;
use weave_ir::ValueType;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsDocTypeMapper;

impl TypeMapper for JsDocTypeMapper {
    fn language(&self) -> &'static str {
        "nodejs"
    }

    fn map_type(&self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::String | ValueType::Path => "string",
            ValueType::Int | ValueType::Float => "number",
            ValueType::Bool => "boolean",
        }
    }

    fn map_optional_type(&self, ty: ValueType) -> String {
        format!("{} | undefined", self.map_type(ty))
    }

    fn map_list_type(&self, ty: ValueType) -> String {
        format!("{}[]", self.map_type(ty))
    }
}
