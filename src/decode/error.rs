use crate::core::SectionKind;
use crate::core::instruction::Opcode;
use crate::core::types::ValueType;
use crate::decode::module::InvalidSectionIdError;
use crate::decode::types::externkind::InvalidExternalKindError;
use crate::decode::types::valtype::InvalidValueTypeError;
use thiserror::Error;

/// The error returned by every decoding operation: what went wrong, and the byte offset
/// (relative to the start of the input) at which it was detected.
///
/// Decoding is fail-fast. Once an error is returned, nothing more is read and the visitor
/// receives no further events.
#[derive(Debug, Error, PartialEq, Clone)]
#[error("{kind} at offset {offset:#x}")]
pub struct DecodeError {
    offset: usize,
    kind: ErrorKind,
}

impl DecodeError {
    pub fn new(offset: usize, kind: impl Into<ErrorKind>) -> Self {
        Self {
            offset,
            kind: kind.into(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ErrorKind {
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),

    #[error("integer too large: representation exceeds {max_bits} bits")]
    NumberTooLarge { max_bits: u32 },

    #[error("invalid section: {0}")]
    InvalidSection(#[from] InvalidSectionError),

    #[error("unknown opcode {0:#04X}")]
    UnknownOpcode(u8),

    #[error("truncated input: {needed} more byte(s) needed")]
    TruncatedInput { needed: usize },
}

/// <https://www.w3.org/TR/wasm-core-1/#binary-magic>
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum HeaderError {
    #[error("bad magic number: expected 0x6D736100 (\"\\0asm\"); got {0:#010X}")]
    BadMagic(u32),

    #[error("unsupported version: expected 1; got {0}")]
    BadVersion(u32),
}

/// Every way a section's structure can be malformed.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum InvalidSectionError {
    #[error(transparent)]
    UnknownSectionCode(#[from] InvalidSectionIdError),

    #[error("{kind} section size mismatch: declared {declared} bytes; consumed {consumed}")]
    SizeMismatch {
        kind: SectionKind,
        declared: u32,
        consumed: usize,
    },

    #[error("{kind} section runs {needed} byte(s) past its declared size of {declared}")]
    SectionOverrun {
        kind: SectionKind,
        declared: u32,
        needed: usize,
    },

    #[error("function body runs {needed} byte(s) past its declared size")]
    BodyOverrun { needed: usize },

    #[error(transparent)]
    InvalidValueType(#[from] InvalidValueTypeError),

    #[error(transparent)]
    InvalidExternalKind(#[from] InvalidExternalKindError),

    #[error("invalid function type form: expected 0x60; got {0:#04X}")]
    InvalidFunctionTypeForm(u8),

    #[error("{0} is not a valid {1}")]
    InvalidType(ValueType, &'static str),

    #[error("invalid {what} flag: expected 0 or 1; got {value}")]
    InvalidFlag { what: &'static str, value: u8 },

    #[error("reserved immediate must be zero")]
    NonZeroReserved,

    #[error("{0} is not allowed in a constant expression")]
    NonConstantInstruction(Opcode),

    #[error("constant expression must be terminated by end; got {0}")]
    UnterminatedConstExpr(Opcode),

    #[error("name is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("out of order section: {current} cannot appear after {previous}")]
    SectionOutOfOrder {
        current: SectionKind,
        previous: SectionKind,
    },

    #[error("encountered duplicate section: {0}")]
    DuplicateSection(SectionKind),

    #[error("function declares {actual_locals} locals; at most {max_locals} are allowed")]
    TooManyLocals { max_locals: u64, actual_locals: u64 },

    #[error("{0} without an enclosing block")]
    UnbalancedDelimiter(Opcode),

    #[error("{count} byte(s) found after the final end of a function body")]
    TrailingBytesAfterEnd { count: usize },
}
