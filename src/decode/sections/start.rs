use crate::core::indices::FuncIdx;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#start-section%E2%91%A0>
pub(crate) fn decode_start_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    visitor.start_function(FuncIdx(reader.read_var_u32()?))
}
