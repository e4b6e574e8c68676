//! Python type annotations for hook signatures.

use weave_codegen::TypeMapper;
use weave_ir::ValueType;

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTypeMapper;

impl TypeMapper for PythonTypeMapper {
    fn language(&self) -> &'static str {
        "python"
    }

    fn map_type(&self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::String => "str",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Path => "pathlib.Path",
        }
    }

    fn map_optional_type(&self, ty: ValueType) -> String {
        format!("{} | None", self.map_type(ty))
    }

    /// click hands repeated values over as a tuple.
    fn map_list_type(&self, ty: ValueType) -> String {
        format!("tuple[{}, ...]", self.map_type(ty))
    }
}
