use crate::core::types::{GlobalType, ValueType};
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;

impl GlobalType {
    /// <https://www.w3.org/TR/wasm-core-1/#binary-globaltype>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let content_type = ValueType::decode_number(reader)?;
        let mutable = reader.read_flag("mutability")?;
        Ok(GlobalType {
            content_type,
            mutable,
        })
    }
}
