//! Decoding of the WebAssembly binary format: the byte cursor, the varint codec, type records,
//! instructions, and the module-level section state machine.
pub mod error;
pub(crate) mod helpers;
pub mod instructions;
pub mod integer;
pub(crate) mod module;
pub mod reader;
pub(crate) mod sections;
pub mod types;

pub use error::{DecodeError, ErrorKind, HeaderError, InvalidSectionError};
pub use instructions::Instructions;
pub use module::{Decoder, DecoderConfig, InvalidSectionIdError, MAGIC, VERSION, decode, decode_module};
pub use reader::Reader;

pub(crate) trait FromMarkerByte
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    type Error: From<u8>;

    // defines the mapping between expected bytes and the corresponding value
    fn markers() -> &'static phf::OrderedMap<u8, Self>;

    fn markers_formatted() -> String {
        Self::markers()
            .entries()
            .map(|(marker, variant)| format!("{marker:#04X} ({variant:?})"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_marker(b: u8) -> Result<Self, Self::Error> {
        match Self::markers().get(&b) {
            Some(n) => Ok(*n),
            None => Err(b.into()),
        }
    }
}
