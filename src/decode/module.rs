use crate::core::{Module, ModuleHeader, Section, SectionKind};
use crate::decode::FromMarkerByte;
use crate::decode::error::{DecodeError, HeaderError, InvalidSectionError};
use crate::decode::helpers::to_usize;
use crate::decode::reader::Reader;
use crate::decode::sections::*;
use crate::visitor::{ModuleBuilder, Visitor};
use log::debug;
use phf::phf_ordered_map;
use thiserror::Error;

/// `\0asm`, read as a little-endian `u32`.
pub const MAGIC: u32 = 0x6D73_6100;
pub const VERSION: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("invalid section ID: expected one of {markers}; got {0:#04X}", markers=SectionKind::markers_formatted())]
pub struct InvalidSectionIdError(pub u8);

impl From<u8> for InvalidSectionIdError {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

// Valid marker bytes for [SectionKind].
#[expect(non_upper_case_globals)]
static SectionId_MARKERS: phf::OrderedMap<u8, SectionKind> = phf_ordered_map! {
            0u8 => SectionKind::Custom,
            1u8 => SectionKind::Type,
            2u8 => SectionKind::Import,
            3u8 => SectionKind::Function,
            4u8 => SectionKind::Table,
            5u8 => SectionKind::Memory,
            6u8 => SectionKind::Global,
            7u8 => SectionKind::Export,
            8u8 => SectionKind::Start,
            9u8 => SectionKind::Element,
            10u8 => SectionKind::Code,
            11u8 => SectionKind::Data,
};

impl FromMarkerByte for SectionKind {
    type Error = InvalidSectionIdError;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &SectionId_MARKERS
    }
}

/// Knobs for a [`Decoder`]. The defaults accept everything the MVP binary grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Reject non-custom sections that are out of order or repeated.
    pub strict_section_order: bool,
    /// Upper bound on the number of locals a single function body may declare.
    pub max_function_locals: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_section_order: false,
            max_function_locals: u64::from(u32::MAX),
        }
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_section_order(mut self, strict: bool) -> Self {
        self.strict_section_order = strict;
        self
    }

    pub fn max_function_locals(mut self, max: u64) -> Self {
        self.max_function_locals = max;
        self
    }
}

/// Drives a [`Visitor`] over one binary module: header first, then every section in wire
/// order until the input is exhausted.
///
/// A decoder is single-use and owns nothing but its cursor; it borrows the input for as long
/// as it lives.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: Reader<'a>,
    config: DecoderConfig,
    previous_kind: Option<SectionKind>,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, DecoderConfig::default())
    }

    pub fn with_config(input: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            reader: Reader::new(input),
            config,
            previous_kind: None,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes the whole module into `visitor`.
    ///
    /// The header is validated before the first event, so a module with a bad header produces
    /// no events at all.
    pub fn decode<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<(), DecodeError> {
        let header = self.decode_header()?;

        visitor.module_start()?;
        visitor.header(&header)?;

        while !self.reader.is_empty() {
            self.decode_section(visitor)?;
        }

        debug!("decoded module ({} bytes)", self.reader.offset());
        visitor.module_end()
    }

    fn decode_header(&mut self) -> Result<ModuleHeader, DecodeError> {
        let magic_at = self.reader.offset();
        let magic = self.reader.read_u32()?;
        if magic != MAGIC {
            return Err(DecodeError::new(magic_at, HeaderError::BadMagic(magic)));
        }

        let version_at = self.reader.offset();
        let version = self.reader.read_u32()?;
        if version != VERSION {
            return Err(DecodeError::new(version_at, HeaderError::BadVersion(version)));
        }

        Ok(ModuleHeader { magic, version })
    }

    fn decode_section<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), DecodeError> {
        let id_at = self.reader.offset();
        let id = self.reader.read_u8()?;
        let kind = SectionKind::from_marker(id)
            .map_err(|e| DecodeError::new(id_at, InvalidSectionError::from(e)))?;

        let length = self.reader.read_var_u32()?;
        let mut body = self.reader.sub_reader(to_usize(length))?;

        if self.config.strict_section_order {
            self.validate_section_kind_expected(kind, id_at)?;
        }

        let overrun = |needed| InvalidSectionError::SectionOverrun {
            kind,
            declared: length,
            needed,
        };

        let offset = body.offset();
        let name = if kind == SectionKind::Custom {
            Some(body.read_name().map_err(|e| body.overrun_error(e, overrun))?)
        } else {
            None
        };
        let section = Section {
            kind,
            length,
            offset,
            name,
        };

        debug!("decoding {kind} section ({length} bytes at {offset:#x})");
        visitor.section_start(&section)?;

        let decoded = match kind {
            SectionKind::Custom => decode_custom_section(&mut body, &section, visitor),
            SectionKind::Type => decode_type_section(&mut body, visitor),
            SectionKind::Import => decode_import_section(&mut body, visitor),
            SectionKind::Function => decode_function_section(&mut body, visitor),
            SectionKind::Table => decode_table_section(&mut body, visitor),
            SectionKind::Memory => decode_memory_section(&mut body, visitor),
            SectionKind::Global => decode_global_section(&mut body, visitor),
            SectionKind::Export => decode_export_section(&mut body, visitor),
            SectionKind::Start => decode_start_section(&mut body, visitor),
            SectionKind::Element => decode_element_section(&mut body, visitor),
            SectionKind::Code => {
                decode_code_section(&mut body, visitor, self.config.max_function_locals)
            }
            SectionKind::Data => decode_data_section(&mut body, visitor),
        };
        decoded.map_err(|e| body.overrun_error(e, overrun))?;

        if !body.is_empty() {
            return Err(body.error(InvalidSectionError::SizeMismatch {
                kind,
                declared: length,
                consumed: to_usize(length) - body.remaining(),
            }));
        }

        visitor.section_end(&section)
    }

    fn validate_section_kind_expected(
        &mut self,
        current: SectionKind,
        at: usize,
    ) -> Result<(), DecodeError> {
        // Custom sections may appear anywhere in the module and multiple times
        if current == SectionKind::Custom {
            return Ok(());
        }

        if let Some(previous) = self.previous_kind {
            if current < previous {
                return Err(DecodeError::new(
                    at,
                    InvalidSectionError::SectionOutOfOrder { current, previous },
                ));
            }
            if current == previous {
                return Err(DecodeError::new(
                    at,
                    InvalidSectionError::DuplicateSection(current),
                ));
            }
        }

        self.previous_kind = Some(current);
        Ok(())
    }
}

/// Decodes `input` into `visitor` with the default configuration.
pub fn decode<V: Visitor + ?Sized>(input: &[u8], visitor: &mut V) -> Result<(), DecodeError> {
    Decoder::new(input).decode(visitor)
}

/// Decode `input` into an owned [Module], decoding every function body's instructions.
pub fn decode_module(input: &[u8]) -> Result<Module, DecodeError> {
    let mut builder = ModuleBuilder::new();
    decode(input, &mut builder)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::error::ErrorKind;
    use crate::visitor::NoOpVisitor;

    const HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    fn module(sections: &[u8]) -> Vec<u8> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(sections);
        bytes
    }

    fn decode_with(config: DecoderConfig, bytes: &[u8]) -> Result<(), DecodeError> {
        Decoder::with_config(bytes, config).decode(&mut NoOpVisitor)
    }

    #[test]
    fn accepts_the_bare_header() {
        assert_eq!(decode(&HEADER, &mut NoOpVisitor), Ok(()));
    }

    #[test]
    fn rejects_bad_version_at_its_offset() {
        let err = decode(&[0x00, 0x61, 0x73, 0x6D, 0x02, 0x00, 0x00, 0x00], &mut NoOpVisitor)
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidHeader(HeaderError::BadVersion(2)));
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn short_header_is_truncated() {
        let err = decode(&HEADER[..6], &mut NoOpVisitor).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput { needed: 2 });
    }

    #[test]
    fn rejects_unknown_section_id() {
        let err = decode(&module(&[0x0C, 0x01, 0x00]), &mut NoOpVisitor).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::UnknownSectionCode(
                InvalidSectionIdError(0x0C)
            ))
        );
        assert_eq!(err.offset(), 8);
        assert!(err.to_string().contains("0x0B (Data)"));
    }

    #[test]
    fn entry_running_past_its_section_is_an_overrun() {
        // type section declares 3 bytes, its entry needs 4; an empty memory section follows
        let bytes = module(&[0x01, 0x03, 0x01, 0x60, 0x00, 0x00, 0x05, 0x01, 0x00]);
        let err = decode(&bytes, &mut NoOpVisitor).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::SectionOverrun {
                kind: SectionKind::Type,
                declared: 3,
                needed: 1,
            })
        );
        assert_eq!(err.offset(), 13);
    }

    #[test]
    fn section_order_is_only_enforced_when_strict() {
        // memory section, then type section
        let bytes = module(&[0x05, 0x01, 0x00, 0x01, 0x01, 0x00]);
        assert_eq!(decode_with(DecoderConfig::default(), &bytes), Ok(()));

        let err = decode_with(DecoderConfig::new().strict_section_order(true), &bytes).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::SectionOutOfOrder {
                current: SectionKind::Type,
                previous: SectionKind::Memory,
            })
        );
        assert_eq!(err.offset(), 11);
    }

    #[test]
    fn strict_mode_rejects_duplicates_but_not_repeated_custom_sections() {
        let custom = [0x00, 0x02, 0x01, b'a'];
        let mut sections = custom.to_vec();
        sections.extend_from_slice(&[0x01, 0x01, 0x00]);
        sections.extend_from_slice(&custom);
        let strict = DecoderConfig::new().strict_section_order(true);
        assert_eq!(decode_with(strict, &module(&sections)), Ok(()));

        sections.extend_from_slice(&[0x01, 0x01, 0x00]);
        let err = decode_with(strict, &module(&sections)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::DuplicateSection(SectionKind::Type))
        );
    }

    #[test]
    fn locals_limit_comes_from_config() {
        // type () -> (), one function, body declaring 3 i32 locals
        let bytes = module(&[
            0x01, 0x04, 0x01, 0x60, 0x00, 0x00, // type
            0x03, 0x02, 0x01, 0x00, // function
            0x0A, 0x06, 0x01, 0x04, 0x01, 0x03, 0x7F, 0x0B, // code
        ]);
        assert_eq!(decode_with(DecoderConfig::default(), &bytes), Ok(()));

        let err = decode_with(DecoderConfig::new().max_function_locals(2), &bytes).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidSection(InvalidSectionError::TooManyLocals { max_locals: 2, .. })
        ));
    }
}
