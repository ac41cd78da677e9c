use crate::core::ElementEntry;
use crate::core::indices::{FuncIdx, TableIdx};
use crate::core::instruction::ConstExpr;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// Each entry is a table index, an offset expression and a vector of function indices. The
/// indices are reported one by one between `element_entry` and `element_entry_end`.
///
/// <https://www.w3.org/TR/wasm-core-1/#element-section%E2%91%A0>
pub(crate) fn decode_element_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.element_section(count)?;

    for index in 0..count {
        let table_index = TableIdx(reader.read_var_u32()?);
        let offset = ConstExpr::decode(reader)?;
        let element_count = reader.read_var_u32()?;
        let entry = ElementEntry {
            table_index,
            offset,
            element_count,
        };

        visitor.element_entry(index, &entry)?;
        for i in 0..element_count {
            visitor.element(i, FuncIdx(reader.read_var_u32()?))?;
        }
        visitor.element_entry_end(index, &entry)?;
    }

    Ok(())
}
