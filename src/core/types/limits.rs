/// Limits classify the size range of resizeable storage associated with memory types and
/// table types. If no maximum is given, the respective storage can grow to any size.
///
/// <https://www.w3.org/TR/wasm-core-1/#limits>
/// <https://www.w3.org/TR/wasm-core-1/#binary-limits>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ResizableLimits {
    pub initial: u32,
    pub maximum: Option<u32>,
}
