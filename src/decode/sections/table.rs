use crate::core::types::TableType;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#table-section%E2%91%A0>
pub(crate) fn decode_table_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.table_section(count)?;

    for index in 0..count {
        let table = TableType::decode(reader)?;
        visitor.table_entry(index, &table)?;
    }

    Ok(())
}
