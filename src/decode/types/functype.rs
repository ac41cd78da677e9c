use crate::core::types::{FunctionType, ValueType};
use crate::decode::error::{DecodeError, InvalidSectionError};
use crate::decode::helpers::capacity_hint;
use crate::decode::reader::Reader;

impl FunctionType {
    const FORM: u8 = 0x60;

    /// Reads the `func` form byte, the parameter types, a has-return flag and the optional
    /// result type.
    ///
    /// <https://www.w3.org/TR/wasm-core-1/#binary-functype>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let form = reader.read_u8()?;
        if form != Self::FORM {
            return Err(DecodeError::new(
                start,
                InvalidSectionError::InvalidFunctionTypeForm(form),
            ));
        }

        let param_count = reader.read_var_u32()?;
        let mut params = Vec::with_capacity(capacity_hint(param_count, reader));
        for _ in 0..param_count {
            params.push(ValueType::decode_number(reader)?);
        }

        let result = if reader.read_flag("has-return")? {
            Some(ValueType::decode_number(reader)?)
        } else {
            None
        };

        Ok(FunctionType { params, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::error::ErrorKind;

    #[test]
    fn decodes_params_and_result() {
        let bytes = [0x60, 0x02, 0x7F, 0x7E, 0x01, 0x7C];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            FunctionType::decode(&mut r).unwrap(),
            FunctionType {
                params: vec![ValueType::I32, ValueType::I64],
                result: Some(ValueType::F64),
            }
        );
        assert!(r.is_empty());
    }

    #[test]
    fn decodes_empty_signature() {
        let bytes = [0x60, 0x00, 0x00];
        assert_eq!(
            FunctionType::decode(&mut Reader::new(&bytes)).unwrap(),
            FunctionType::default()
        );
    }

    #[test]
    fn rejects_wrong_form() {
        let bytes = [0x5F, 0x00, 0x00];
        let err = FunctionType::decode(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::InvalidFunctionTypeForm(0x5F))
        );
    }

    #[test]
    fn rejects_has_return_flag_above_one() {
        let bytes = [0x60, 0x00, 0x02, 0x7F];
        let err = FunctionType::decode(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidSection(InvalidSectionError::InvalidFlag {
                what: "has-return",
                value: 2,
            })
        );
        assert_eq!(err.offset(), 2);
    }
}
