use crate::core::types::ExternalKind;
use crate::decode::error::{DecodeError, InvalidSectionError};
use crate::decode::reader::Reader;
use crate::decode::FromMarkerByte;
use phf::phf_ordered_map;
use thiserror::Error;

// Valid marker bytes for [ExternalKind].
#[expect(non_upper_case_globals)]
static ExternalKind_MARKERS: phf::OrderedMap<u8, ExternalKind> = phf_ordered_map! {
    0x00u8 => ExternalKind::Function,
    0x01u8 => ExternalKind::Table,
    0x02u8 => ExternalKind::Memory,
    0x03u8 => ExternalKind::Global,
};

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error(
    "invalid external kind marker byte - expected one of {markers}; got {0:#04X}",
    markers = ExternalKind::markers_formatted()
)]
pub struct InvalidExternalKindError(pub u8);

impl From<u8> for InvalidExternalKindError {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

impl FromMarkerByte for ExternalKind {
    type Error = InvalidExternalKindError;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ExternalKind_MARKERS
    }
}

impl ExternalKind {
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let b = reader.read_u8()?;
        Self::from_marker(b).map_err(|e| DecodeError::new(start, InvalidSectionError::from(e)))
    }
}
