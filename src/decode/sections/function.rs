use crate::core::indices::TypeIdx;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#function-section%E2%91%A0>
pub(crate) fn decode_function_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.function_section(count)?;

    for index in 0..count {
        visitor.function_entry(index, TypeIdx(reader.read_var_u32()?))?;
    }

    Ok(())
}
