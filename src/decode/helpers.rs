use super::error::{DecodeError, InvalidSectionError};
use super::reader::Reader;

/// Converts a wire-level count into a `usize`, saturating on targets narrower than 32 bits.
pub(crate) fn to_usize(n: u32) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Upper bound for pre-allocating `count` items: never more than the bytes left to read them from.
pub(crate) fn capacity_hint(count: u32, reader: &Reader<'_>) -> usize {
    to_usize(count).min(reader.remaining())
}

impl<'a> Reader<'a> {
    /// A `varuint32` length followed by that many raw bytes.
    pub fn read_byte_vector(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_var_u32()?;
        self.read_bytes(to_usize(len))
    }

    /// A `varuint1` flag. Any other value is an invalid `what` flag.
    pub fn read_flag(&mut self, what: &'static str) -> Result<bool, DecodeError> {
        let start = self.offset();
        match self.read_var_u7()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::new(
                start,
                InvalidSectionError::InvalidFlag { what, value },
            )),
        }
    }

    /// A length-prefixed UTF-8 string.
    ///
    /// <https://www.w3.org/TR/wasm-core-1/#binary-name>
    pub fn read_name(&mut self) -> Result<String, DecodeError> {
        let start = self.offset();
        let bytes = self.read_byte_vector()?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(e) => Err(DecodeError::new(start, InvalidSectionError::InvalidUtf8(e))),
        }
    }
}
