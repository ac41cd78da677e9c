use crate::core::types::valtype::ValueType;

/// Global types classify global variables, which hold a value and can either be mutable or
/// immutable.
///
/// <https://www.w3.org/TR/wasm-core-1/#global-types>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GlobalType {
    pub content_type: ValueType,
    pub mutable: bool,
}
