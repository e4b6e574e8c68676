use weave_ir::{ParameterSpec, ValueType};

/// Trait for mapping IR value types to language-specific type strings.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    fn map_type(&self, ty: ValueType) -> &'static str;

    /// Type of a value that may be absent (e.g., `Option<String>` in Rust,
    /// `string | undefined` in TS).
    fn map_optional_type(&self, ty: ValueType) -> String;

    /// Type of a value given more than once.
    fn map_list_type(&self, ty: ValueType) -> String;

    /// Type a hook parameter is declared with.
    ///
    /// Flags are never optional: an absent flag is `false`.
    fn parameter_type(&self, param: &ParameterSpec) -> String {
        if param.multiple {
            self.map_list_type(param.ty)
        } else if !param.required && param.ty != ValueType::Bool {
            self.map_optional_type(param.ty)
        } else {
            self.map_type(param.ty).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use weave_ir::ParameterSource;

    use super::*;

    struct Angle;

    impl TypeMapper for Angle {
        fn language(&self) -> &'static str {
            "angle"
        }

        fn map_type(&self, ty: ValueType) -> &'static str {
            ty.as_str()
        }

        fn map_optional_type(&self, ty: ValueType) -> String {
            format!("maybe<{}>", ty.as_str())
        }

        fn map_list_type(&self, ty: ValueType) -> String {
            format!("list<{}>", ty.as_str())
        }
    }

    fn param(ty: ValueType, required: bool, multiple: bool) -> ParameterSpec {
        ParameterSpec {
            name: "p".into(),
            flag: "p".into(),
            source: ParameterSource::Option,
            ty,
            required,
            multiple,
        }
    }

    #[test]
    fn test_parameter_type() {
        assert_eq!(Angle.parameter_type(&param(ValueType::Int, true, false)), "int");
        assert_eq!(
            Angle.parameter_type(&param(ValueType::Int, false, false)),
            "maybe<int>"
        );
        assert_eq!(
            Angle.parameter_type(&param(ValueType::Path, false, true)),
            "list<path>"
        );
        assert_eq!(Angle.parameter_type(&param(ValueType::Bool, false, false)), "bool");
    }
}
