use crate::core::types::limits::ResizableLimits;
use crate::core::types::valtype::ValueType;

/// Table types classify tables over elements of `anyfunc` within a size range given in
/// numbers of entries.
///
/// <https://www.w3.org/TR/wasm-core-1/#table-types>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TableType {
    pub element_type: ValueType,
    pub limits: ResizableLimits,
}

/// Memory types classify linear memories and their size range, in units of 64KiB pages.
///
/// <https://www.w3.org/TR/wasm-core-1/#memory-types>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MemoryType {
    pub limits: ResizableLimits,
}
