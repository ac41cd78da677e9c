//! Instruction decoding.
//!
//! Decoding one instruction reads its opcode byte, looks up the opcode's [`ImmediateShape`] and
//! decodes exactly the fields that shape specifies. The same routine serves whole function
//! bodies (through [`Instructions`]) and the restricted constant-expression grammar.
//!
//! Defined in <https://www.w3.org/TR/wasm-core-1/#binary-instr>
use crate::core::FunctionBody;
use crate::core::indices::TypeIdx;
use crate::core::instruction::{
    BranchTable, ConstExpr, Immediate, ImmediateShape, Instruction, MemArg, Opcode,
};
use crate::core::types::ValueType;
use crate::decode::error::{DecodeError, ErrorKind, InvalidSectionError};
use crate::decode::helpers::capacity_hint;
use crate::decode::reader::Reader;

impl Instruction {
    /// Decodes the instruction at the reader's position.
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let byte = reader.read_u8()?;
        let opcode = Opcode::from_byte(byte)
            .ok_or_else(|| DecodeError::new(start, ErrorKind::UnknownOpcode(byte)))?;
        let immediate = Immediate::decode(opcode.shape(), reader)?;
        Ok(Instruction { opcode, immediate })
    }
}

impl Immediate {
    /// Decodes an operand of the given shape.
    pub fn decode(shape: ImmediateShape, reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(match shape {
            ImmediateShape::None => Immediate::None,
            ImmediateShape::Index => Immediate::Index(reader.read_var_u32()?),
            ImmediateShape::BlockType => {
                Immediate::BlockType(ValueType::decode_block_type(reader)?)
            }
            ImmediateShape::VarI32 => Immediate::I32(reader.read_var_i32()?),
            ImmediateShape::VarI64 => Immediate::I64(reader.read_var_i64()?),
            ImmediateShape::F32 => Immediate::F32(reader.read_f32()?),
            ImmediateShape::F64 => Immediate::F64(reader.read_f64()?),
            ImmediateShape::BranchTable => Immediate::BranchTable(BranchTable::decode(reader)?),
            ImmediateShape::Memory => Immediate::Memory(MemArg::decode(reader)?),
            ImmediateShape::CallIndirect => {
                let type_index = TypeIdx(reader.read_var_u32()?);
                read_reserved(reader)?;
                Immediate::CallIndirect(type_index)
            }
            ImmediateShape::Reserved => {
                read_reserved(reader)?;
                Immediate::None
            }
        })
    }
}

/// A one-byte immediate the MVP reserves for future use; it must be zero.
fn read_reserved(reader: &mut Reader<'_>) -> Result<(), DecodeError> {
    let start = reader.offset();
    if reader.read_var_u7()? != 0 {
        return Err(DecodeError::new(start, InvalidSectionError::NonZeroReserved));
    }
    Ok(())
}

impl BranchTable {
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let count = reader.read_var_u32()?;
        let mut targets = Vec::with_capacity(capacity_hint(count, reader));
        for _ in 0..count {
            targets.push(reader.read_var_u32()?);
        }
        let default = reader.read_var_u32()?;
        Ok(BranchTable { targets, default })
    }
}

impl MemArg {
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let flags = reader.read_var_u32()?;
        let offset = reader.read_var_u32()?;
        Ok(MemArg { flags, offset })
    }
}

impl ConstExpr {
    /// Decodes a constant expression: one `global.get` or `*.const` instruction followed by
    /// `end`.
    ///
    /// <https://www.w3.org/TR/wasm-core-1/#constant-expressions%E2%91%A0>
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let start = reader.offset();
        let expr = ConstExpr::try_from(Instruction::decode(reader)?).map_err(|op| {
            DecodeError::new(start, InvalidSectionError::NonConstantInstruction(op))
        })?;

        let end_at = reader.offset();
        let end = Instruction::decode(reader)?;
        if end.opcode != Opcode::End {
            return Err(DecodeError::new(
                end_at,
                InvalidSectionError::UnterminatedConstExpr(end.opcode),
            ));
        }

        Ok(expr)
    }
}

/// An iterator decoding a function body's instruction stream one instruction at a time.
///
/// Nesting is tracked so that iteration stops right after the `end` closing the function
/// (which is yielded). An `else` outside an `if`, bytes left after the final `end`, or a
/// stream that runs out before it are errors. Running out inside a window that the input
/// continues past is an overrun of the body's declared size rather than a truncation. After
/// the first error the iterator is fused.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    reader: Reader<'a>,
    blocks: Vec<Opcode>,
    done: bool,
}

impl<'a> Instructions<'a> {
    pub fn new(reader: Reader<'a>) -> Self {
        Self {
            reader,
            blocks: Vec::new(),
            done: false,
        }
    }

    /// The position of the next instruction.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// The number of blocks currently open, not counting the function body itself.
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    fn decode_next(&mut self) -> Result<Instruction, DecodeError> {
        let start = self.reader.offset();
        let instr = Instruction::decode(&mut self.reader)?;

        match instr.opcode {
            op if op.opens_block() => self.blocks.push(op),
            Opcode::Else => match self.blocks.last_mut() {
                Some(top) if *top == Opcode::If => *top = Opcode::Else,
                _ => {
                    return Err(DecodeError::new(
                        start,
                        InvalidSectionError::UnbalancedDelimiter(Opcode::Else),
                    ));
                }
            },
            Opcode::End => {
                if self.blocks.pop().is_none() {
                    self.done = true;
                    if !self.reader.is_empty() {
                        return Err(self.reader.error(InvalidSectionError::TrailingBytesAfterEnd {
                            count: self.reader.remaining(),
                        }));
                    }
                }
            }
            _ => {}
        }

        Ok(instr)
    }
}

impl Iterator for Instructions<'_> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.decode_next().map_err(|e| {
            self.reader
                .overrun_error(e, |needed| InvalidSectionError::BodyOverrun { needed })
        });
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Instructions<'_> {}

impl<'a> FunctionBody<'a> {
    /// Decodes the body's instructions, up to and including its final `end`.
    pub fn instructions(&self) -> Instructions<'a> {
        Instructions::new(self.code())
    }
}
