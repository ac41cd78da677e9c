use crate::core::types::ResizableLimits;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;

impl ResizableLimits {
    /// A has-maximum flag, the initial size, and the maximum when flagged.
    ///
    /// <https://www.w3.org/TR/wasm-core-1/#binary-limits>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let has_max = reader.read_flag("has-maximum")?;
        let initial = reader.read_var_u32()?;
        let maximum = if has_max {
            Some(reader.read_var_u32()?)
        } else {
            None
        };

        Ok(ResizableLimits { initial, maximum })
    }
}
