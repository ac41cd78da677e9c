use crate::core::types::FunctionType;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#type-section%E2%91%A0>
pub(crate) fn decode_type_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.type_section(count)?;

    for index in 0..count {
        let ty = FunctionType::decode(reader)?;
        visitor.type_entry(index, &ty)?;
    }

    Ok(())
}
