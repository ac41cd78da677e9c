use super::ValueType;

/// Function types classify the signature of functions: an ordered list of parameters and, in
/// the MVP, at most one result.
///
/// <https://www.w3.org/TR/wasm-core-1/#function-types>
/// <https://www.w3.org/TR/wasm-core-1/#binary-functype>
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct FunctionType {
    pub params: Vec<ValueType>,
    pub result: Option<ValueType>,
}
