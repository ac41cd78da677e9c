use crate::core::types::ValueType;
use crate::core::{FunctionBody, LocalEntry};
use crate::decode::error::{DecodeError, InvalidSectionError};
use crate::decode::helpers::{capacity_hint, to_usize};
use crate::decode::reader::Reader;
use crate::visitor::Visitor;

/// Reads each body's size and local declarations, and hands the visitor a bounded cursor over
/// the instructions without decoding them.
///
/// <https://www.w3.org/TR/wasm-core-1/#code-section%E2%91%A0>
pub(crate) fn decode_code_section<V: Visitor + ?Sized>(
    reader: &mut Reader<'_>,
    visitor: &mut V,
    max_locals: u64,
) -> Result<(), DecodeError> {
    let count = reader.read_var_u32()?;
    visitor.code_section(count)?;

    for index in 0..count {
        let offset = reader.offset();
        let size = reader.read_var_u32()?;
        let mut code = reader.sub_reader(to_usize(size))?;
        let locals = decode_locals(&mut code, max_locals).map_err(|e| {
            code.overrun_error(e, |needed| InvalidSectionError::BodyOverrun { needed })
        })?;

        let body = FunctionBody {
            index,
            size,
            offset,
            locals,
            code,
        };
        visitor.function_body(&body)?;
        visitor.function_body_end(&body)?;
    }

    Ok(())
}

fn decode_locals(reader: &mut Reader<'_>, max_locals: u64) -> Result<Vec<LocalEntry>, DecodeError> {
    let count = reader.read_var_u32()?;
    let mut locals = Vec::with_capacity(capacity_hint(count, reader));
    let mut expanded_locals: u64 = 0;

    for _ in 0..count {
        let start = reader.offset();
        let n = reader.read_var_u32()?;

        expanded_locals += u64::from(n);
        if expanded_locals > max_locals {
            return Err(DecodeError::new(
                start,
                InvalidSectionError::TooManyLocals {
                    max_locals,
                    actual_locals: expanded_locals,
                },
            ));
        }

        let value_type = ValueType::decode_number(reader)?;
        locals.push(LocalEntry {
            count: n,
            value_type,
        });
    }

    Ok(locals)
}
