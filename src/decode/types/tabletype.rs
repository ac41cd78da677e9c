use crate::core::types::{MemoryType, ResizableLimits, TableType, ValueType};
use crate::decode::error::{DecodeError, InvalidSectionError};
use crate::decode::reader::Reader;

impl TableType {
    /// An element type, which must be `anyfunc` in the MVP, followed by the table's limits.
    ///
    /// <https://www.w3.org/TR/wasm-core-1/#binary-tabletype>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let element_type = ValueType::decode(reader)?;
        if element_type != ValueType::AnyFunc {
            return Err(DecodeError::new(
                start,
                InvalidSectionError::InvalidType(element_type, "table element type"),
            ));
        }
        let limits = ResizableLimits::decode(reader)?;
        Ok(TableType {
            element_type,
            limits,
        })
    }
}

impl MemoryType {
    /// <https://www.w3.org/TR/wasm-core-1/#binary-memtype>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(MemoryType {
            limits: ResizableLimits::decode(reader)?,
        })
    }
}
