use crate::core::DataSegment;
use crate::core::indices::MemIdx;
use crate::core::instruction::ConstExpr;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#data-section%E2%91%A0>
pub(crate) fn decode_data_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.data_section(count)?;

    for index in 0..count {
        let memory_index = MemIdx(reader.read_var_u32()?);
        let offset = ConstExpr::decode(reader)?;
        let data = reader.read_byte_vector()?;
        visitor.data_segment(
            index,
            &DataSegment {
                memory_index,
                offset,
                data,
            },
        )?;
    }

    Ok(())
}
