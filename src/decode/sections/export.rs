use crate::core::ExportEntry;
use crate::core::types::ExternalKind;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#export-section%E2%91%A0>
pub(crate) fn decode_export_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.export_section(count)?;

    for index in 0..count {
        let entry = ExportEntry::decode(reader)?;
        visitor.export_entry(index, &entry)?;
    }

    Ok(())
}

impl ExportEntry {
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let field = reader.read_name()?;
        let kind = ExternalKind::decode(reader)?;
        let index = reader.read_var_u32()?;
        Ok(ExportEntry { field, kind, index })
    }
}
