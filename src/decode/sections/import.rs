use crate::core::indices::TypeIdx;
use crate::core::types::{ExternalKind, GlobalType, MemoryType, TableType};
use crate::core::{ImportEntry, ImportKind};
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// <https://www.w3.org/TR/wasm-core-1/#import-section%E2%91%A0>
pub(crate) fn decode_import_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.import_section(count)?;

    for index in 0..count {
        let entry = ImportEntry::decode(reader)?;
        visitor.import_entry(index, &entry)?;
    }

    Ok(())
}

impl ImportEntry {
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let module = reader.read_name()?;
        let field = reader.read_name()?;

        let kind = match ExternalKind::decode(reader)? {
            ExternalKind::Function => ImportKind::Function(TypeIdx(reader.read_var_u32()?)),
            ExternalKind::Table => ImportKind::Table(TableType::decode(reader)?),
            ExternalKind::Memory => ImportKind::Memory(MemoryType::decode(reader)?),
            ExternalKind::Global => ImportKind::Global(GlobalType::decode(reader)?),
        };

        Ok(ImportEntry {
            module,
            field,
            kind,
        })
    }
}
