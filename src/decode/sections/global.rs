use crate::core::GlobalEntry;
use crate::core::instruction::ConstExpr;
use crate::core::types::GlobalType;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#global-section%E2%91%A0>
pub(crate) fn decode_global_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.global_section(count)?;

    for index in 0..count {
        let ty = GlobalType::decode(reader)?;
        let init = ConstExpr::decode(reader)?;
        visitor.global_entry(index, &GlobalEntry { ty, init })?;
    }

    Ok(())
}
