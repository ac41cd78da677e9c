use super::error::{DecodeError, ErrorKind, InvalidSectionError};

/// A bounded cursor over a byte slice.
///
/// Positions reported by [`Reader::offset`] (and carried by every [`DecodeError`]) are absolute:
/// a child reader created with [`Reader::sub_reader`] keeps counting from where its parent's
/// bytes start in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
    input_end: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_offset(data, 0)
    }

    /// A reader over `data` whose first byte sits at `base` in some larger input.
    pub fn with_offset(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            pos: 0,
            base,
            input_end: base + data.len(),
        }
    }

    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// The offset one past the last readable byte.
    pub fn end_offset(&self) -> usize {
        self.base + self.data.len()
    }

    /// Whether the input goes on after this reader's last byte, as it does for a section or
    /// body window that is not the last thing in the input.
    pub fn ends_before_input(&self) -> bool {
        self.end_offset() < self.input_end
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// An error of `kind` at the current position.
    pub fn error(&self, kind: impl Into<ErrorKind>) -> DecodeError {
        DecodeError::new(self.offset(), kind)
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        self.error(ErrorKind::TruncatedInput {
            needed: needed - self.remaining(),
        })
    }

    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.truncated(1))
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(self.truncated(len));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Splits off the next `len` bytes as a reader of their own and advances past them.
    pub fn sub_reader(&mut self, len: usize) -> Result<Reader<'a>, DecodeError> {
        let base = self.offset();
        let data = self.read_bytes(len)?;
        Ok(Reader {
            data,
            pos: 0,
            base,
            input_end: self.input_end,
        })
    }

    /// Reports a truncation inside this window as `overrun(needed)` at the window's end, when
    /// the input itself has more bytes: the window's declared length was too short, not the input.
    pub(crate) fn overrun_error(
        &self,
        err: DecodeError,
        overrun: impl FnOnce(usize) -> InvalidSectionError,
    ) -> DecodeError {
        if let ErrorKind::TruncatedInput { needed } = *err.kind()
            && self.ends_before_input()
        {
            return DecodeError::new(self.end_offset(), overrun(needed));
        }
        err
    }
}
