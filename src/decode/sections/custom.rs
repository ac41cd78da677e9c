use crate::core::Section;
use crate::decode::error::DecodeError;
use crate::decode::reader::Reader;
use crate::visitor::Visitor;
use log::warn;

/// Hands the rest of a custom section (its name already read) to the visitor and skips it.
///
/// <https://www.w3.org/TR/wasm-core-1/#custom-section%E2%91%A0>
pub(crate) fn decode_custom_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    section: &Section,
    visitor: &mut V,
) -> Result<(), DecodeError> {
    let payload = reader.remaining_bytes();
    visitor.custom_section(section, payload)?;

    warn!(
        "skipping custom section {:?} ({} bytes at {:#x})",
        section.name.as_deref().unwrap_or_default(),
        payload.len(),
        reader.offset()
    );
    reader.skip(payload.len())
}
