//! Decoding of LEB128-encoded integers.
//!
//! Every read is bounded by the bit width of its target type: once the encoding would carry
//! payload past that width (or simply goes on for too long) decoding fails with
//! [`ErrorKind::NumberTooLarge`], so a malformed number costs at most `ceil(N/7)` bytes.
//!
//! <https://en.wikipedia.org/wiki/LEB128>
//! <https://www.w3.org/TR/wasm-core-1/#integers>
use super::error::{DecodeError, ErrorKind};
use super::reader::Reader;

impl Reader<'_> {
    /// Reads an unsigned LEB128 value of at most `max_bits` significant bits (1..=64).
    pub fn read_var_u(&mut self, max_bits: u32) -> Result<u64, DecodeError> {
        let start = self.offset();
        let too_large = || DecodeError::new(start, ErrorKind::NumberTooLarge { max_bits });

        let mut result: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            if shift >= max_bits {
                return Err(too_large());
            }

            let byte = self.read_u8()?;
            let payload = u64::from(byte & 0x7F);

            // the last byte the width allows may only carry as many bits as are left
            let remaining = max_bits - shift;
            if remaining < 7 && payload >> remaining != 0 {
                return Err(too_large());
            }

            result |= payload << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }

            shift += 7;
        }
    }

    /// Reads a signed LEB128 value of at most `max_bits` significant bits (1..=64).
    pub fn read_var_s(&mut self, max_bits: u32) -> Result<i64, DecodeError> {
        let start = self.offset();
        let too_large = || DecodeError::new(start, ErrorKind::NumberTooLarge { max_bits });

        let mut result: i64 = 0;
        let mut shift: u32 = 0;

        loop {
            if shift >= max_bits {
                return Err(too_large());
            }

            let byte = self.read_u8()?;
            let payload = byte & 0x7F;

            // unused high bits of the last allowed byte must all repeat the sign bit
            let remaining = max_bits - shift;
            if remaining < 7 {
                let padding = payload >> (remaining - 1);
                if padding != 0 && padding != 0x7F >> (remaining - 1) {
                    return Err(too_large());
                }
            }

            result |= i64::from(payload) << shift;
            shift += 7;

            if byte & 0x80 == 0 {
                if shift < 64 && byte & 0x40 != 0 {
                    result |= -1 << shift;
                }
                return Ok(result);
            }
        }
    }

    /// A one-bit flag.
    pub fn read_var_u1(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_var_u(1)? != 0)
    }

    pub fn read_var_u7(&mut self) -> Result<u8, DecodeError> {
        let start = self.offset();
        u8::try_from(self.read_var_u(7)?)
            .map_err(|_| DecodeError::new(start, ErrorKind::NumberTooLarge { max_bits: 7 }))
    }

    pub fn read_var_u32(&mut self) -> Result<u32, DecodeError> {
        let start = self.offset();
        u32::try_from(self.read_var_u(32)?)
            .map_err(|_| DecodeError::new(start, ErrorKind::NumberTooLarge { max_bits: 32 }))
    }

    pub fn read_var_i32(&mut self) -> Result<i32, DecodeError> {
        let start = self.offset();
        i32::try_from(self.read_var_s(32)?)
            .map_err(|_| DecodeError::new(start, ErrorKind::NumberTooLarge { max_bits: 32 }))
    }

    pub fn read_var_i64(&mut self) -> Result<i64, DecodeError> {
        self.read_var_s(64)
    }
}
