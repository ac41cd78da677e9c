use crate::core::types::MemoryType;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#memory-section%E2%91%A0>
pub(crate) fn decode_memory_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.memory_section(count)?;

    for index in 0..count {
        let memory = MemoryType::decode(reader)?;
        visitor.memory_entry(index, &memory)?;
    }

    Ok(())
}
