use crate::core::types::ValueType;
use crate::decode::error::{DecodeError, InvalidSectionError};
use crate::decode::reader::Reader;
use crate::decode::FromMarkerByte;
use phf::phf_ordered_map;
use thiserror::Error;

// Valid marker bytes for [ValueType].
#[expect(non_upper_case_globals)]
static ValueType_MARKERS: phf::OrderedMap<u8, ValueType> = phf_ordered_map! {
    0x7Fu8 => ValueType::I32,
    0x7Eu8 => ValueType::I64,
    0x7Du8 => ValueType::F32,
    0x7Cu8 => ValueType::F64,
    0x70u8 => ValueType::AnyFunc,
    0x60u8 => ValueType::Func,
    0x40u8 => ValueType::Empty,
};

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error(
    "invalid value type marker byte - expected one of {markers}; got {0:#04X}",
    markers = ValueType::markers_formatted()
)]
pub struct InvalidValueTypeError(pub u8);

impl From<u8> for InvalidValueTypeError {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

impl FromMarkerByte for ValueType {
    type Error = InvalidValueTypeError;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ValueType_MARKERS
    }
}

impl ValueType {
    /// Reads any of the seven value-type bytes.
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let b = reader.read_u8()?;
        Self::from_marker(b).map_err(|e| DecodeError::new(start, InvalidSectionError::from(e)))
    }

    /// Reads a value type that must be one of the four numeric types, as locals, parameters,
    /// results and globals require.
    pub fn decode_number(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let ty = Self::decode(reader)?;
        if !ty.is_number() {
            return Err(DecodeError::new(
                start,
                InvalidSectionError::InvalidType(ty, "number type"),
            ));
        }
        Ok(ty)
    }

    /// Reads the signature of a `block`, `loop` or `if`: a numeric type or the empty type.
    pub fn decode_block_type(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let ty = Self::decode(reader)?;
        if !ty.is_number() && ty != ValueType::Empty {
            return Err(DecodeError::new(
                start,
                InvalidSectionError::InvalidType(ty, "block type"),
            ));
        }
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::error::ErrorKind;

    #[test]
    fn decodes_every_marker() {
        for (byte, expected) in ValueType_MARKERS.entries() {
            assert_eq!(ValueType::decode(&mut Reader::new(&[*byte])).unwrap(), *expected);
        }
    }

    #[test]
    fn rejects_unknown_marker_and_lists_expected_ones() {
        let err = ValueType::decode(&mut Reader::new(&[0x7B])).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::InvalidValueType(
                InvalidValueTypeError(0x7B)
            ))
        );
        let msg = err.to_string();
        assert!(msg.contains("0x7F (I32)"), "{msg}");
        assert!(msg.contains("got 0x7B"), "{msg}");
    }

    #[test]
    fn number_types_exclude_function_types() {
        let err = ValueType::decode_number(&mut Reader::new(&[0x70])).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::InvalidType(
                ValueType::AnyFunc,
                "number type"
            ))
        );
        assert_eq!(
            ValueType::decode_block_type(&mut Reader::new(&[0x40])).unwrap(),
            ValueType::Empty
        );
    }
}
