use std::fmt;

/// The closed set of type codes that may appear wherever the binary format expects a single
/// value-type byte: locals, parameters, results, globals, block signatures and table element
/// types.
///
/// <https://www.w3.org/TR/wasm-core-1/#binary-valtype>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    AnyFunc,
    Func,
    /// The empty block signature (`0x40`).
    Empty,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::AnyFunc => "anyfunc",
            ValueType::Func => "func",
            ValueType::Empty => "empty",
        }
    }

    /// Whether this is one of the four numeric types a value on the operand stack can have.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            ValueType::I32 | ValueType::I64 | ValueType::F32 | ValueType::F64
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
