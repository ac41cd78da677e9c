//! The MVP instruction set: opcodes, their immediate shapes, and decoded instruction values.
//!
//! Defined in <https://www.w3.org/TR/wasm-core-1/#instructions>
use crate::core::indices::{GlobalIdx, TypeIdx};
use crate::core::types::ValueType;
use std::fmt;

/// The encoding of the operand(s) that follow an opcode byte in the instruction stream.
///
/// Every [`Opcode`] maps to exactly one shape.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ImmediateShape {
    /// No immediate.
    None,
    /// A single `varuint32` index (local, global, function or label).
    Index,
    /// A single value-type byte annotating a `block`, `loop` or `if`.
    BlockType,
    /// A `varint32` literal.
    VarI32,
    /// A `varint64` literal.
    VarI64,
    /// Four little-endian bytes holding an IEEE 754 single.
    F32,
    /// Eight little-endian bytes holding an IEEE 754 double.
    F64,
    /// A target count, that many label indices, then the default label.
    BranchTable,
    /// Alignment flags then offset, both `varuint32`.
    Memory,
    /// A type index followed by a reserved `varuint1` that must be zero.
    CallIndirect,
    /// A lone reserved `varuint1` that must be zero (`memory.size`, `memory.grow`).
    Reserved,
}

macro_rules! define_opcodes {
    ($($byte:literal => $variant:ident, $name:literal, $shape:ident;)*) => {
        /// Every opcode of the MVP instruction set, discriminated by its encoding byte.
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Opcode {
            $($variant = $byte,)*
        }

        impl Opcode {
            /// All opcodes, in encoding order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

            /// Look up the opcode encoded as `byte`, if there is one.
            pub fn from_byte(byte: u8) -> Option<Self> {
                match byte {
                    $($byte => Some(Opcode::$variant),)*
                    _ => None,
                }
            }

            /// The canonical text-format name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Opcode::$variant => $name,)*
                }
            }

            pub fn shape(self) -> ImmediateShape {
                match self {
                    $(Opcode::$variant => ImmediateShape::$shape,)*
                }
            }
        }
    };
}

define_opcodes! {
    // --- Control instructions ---
    0x00 => Unreachable, "unreachable", None;
    0x01 => Nop, "nop", None;
    0x02 => Block, "block", BlockType;
    0x03 => Loop, "loop", BlockType;
    0x04 => If, "if", BlockType;
    0x05 => Else, "else", None;
    0x0B => End, "end", None;
    0x0C => Br, "br", Index;
    0x0D => BrIf, "br_if", Index;
    0x0E => BrTable, "br_table", BranchTable;
    0x0F => Return, "return", None;
    0x10 => Call, "call", Index;
    0x11 => CallIndirect, "call_indirect", CallIndirect;

    // --- Parametric instructions ---
    0x1A => Drop, "drop", None;
    0x1B => Select, "select", None;

    // --- Variable instructions ---
    0x20 => LocalGet, "local.get", Index;
    0x21 => LocalSet, "local.set", Index;
    0x22 => LocalTee, "local.tee", Index;
    0x23 => GlobalGet, "global.get", Index;
    0x24 => GlobalSet, "global.set", Index;

    // --- Memory instructions ---
    0x28 => I32Load, "i32.load", Memory;
    0x29 => I64Load, "i64.load", Memory;
    0x2A => F32Load, "f32.load", Memory;
    0x2B => F64Load, "f64.load", Memory;
    0x2C => I32Load8S, "i32.load8_s", Memory;
    0x2D => I32Load8U, "i32.load8_u", Memory;
    0x2E => I32Load16S, "i32.load16_s", Memory;
    0x2F => I32Load16U, "i32.load16_u", Memory;
    0x30 => I64Load8S, "i64.load8_s", Memory;
    0x31 => I64Load8U, "i64.load8_u", Memory;
    0x32 => I64Load16S, "i64.load16_s", Memory;
    0x33 => I64Load16U, "i64.load16_u", Memory;
    0x34 => I64Load32S, "i64.load32_s", Memory;
    0x35 => I64Load32U, "i64.load32_u", Memory;
    0x36 => I32Store, "i32.store", Memory;
    0x37 => I64Store, "i64.store", Memory;
    0x38 => F32Store, "f32.store", Memory;
    0x39 => F64Store, "f64.store", Memory;
    0x3A => I32Store8, "i32.store8", Memory;
    0x3B => I32Store16, "i32.store16", Memory;
    0x3C => I64Store8, "i64.store8", Memory;
    0x3D => I64Store16, "i64.store16", Memory;
    0x3E => I64Store32, "i64.store32", Memory;
    0x3F => MemorySize, "memory.size", Reserved;
    0x40 => MemoryGrow, "memory.grow", Reserved;

    // --- Numeric constants ---
    0x41 => I32Const, "i32.const", VarI32;
    0x42 => I64Const, "i64.const", VarI64;
    0x43 => F32Const, "f32.const", F32;
    0x44 => F64Const, "f64.const", F64;

    // --- i32 comparisons ---
    0x45 => I32Eqz, "i32.eqz", None;
    0x46 => I32Eq, "i32.eq", None;
    0x47 => I32Ne, "i32.ne", None;
    0x48 => I32LtS, "i32.lt_s", None;
    0x49 => I32LtU, "i32.lt_u", None;
    0x4A => I32GtS, "i32.gt_s", None;
    0x4B => I32GtU, "i32.gt_u", None;
    0x4C => I32LeS, "i32.le_s", None;
    0x4D => I32LeU, "i32.le_u", None;
    0x4E => I32GeS, "i32.ge_s", None;
    0x4F => I32GeU, "i32.ge_u", None;

    // --- i64 comparisons ---
    0x50 => I64Eqz, "i64.eqz", None;
    0x51 => I64Eq, "i64.eq", None;
    0x52 => I64Ne, "i64.ne", None;
    0x53 => I64LtS, "i64.lt_s", None;
    0x54 => I64LtU, "i64.lt_u", None;
    0x55 => I64GtS, "i64.gt_s", None;
    0x56 => I64GtU, "i64.gt_u", None;
    0x57 => I64LeS, "i64.le_s", None;
    0x58 => I64LeU, "i64.le_u", None;
    0x59 => I64GeS, "i64.ge_s", None;
    0x5A => I64GeU, "i64.ge_u", None;

    // --- f32 comparisons ---
    0x5B => F32Eq, "f32.eq", None;
    0x5C => F32Ne, "f32.ne", None;
    0x5D => F32Lt, "f32.lt", None;
    0x5E => F32Gt, "f32.gt", None;
    0x5F => F32Le, "f32.le", None;
    0x60 => F32Ge, "f32.ge", None;

    // --- f64 comparisons ---
    0x61 => F64Eq, "f64.eq", None;
    0x62 => F64Ne, "f64.ne", None;
    0x63 => F64Lt, "f64.lt", None;
    0x64 => F64Gt, "f64.gt", None;
    0x65 => F64Le, "f64.le", None;
    0x66 => F64Ge, "f64.ge", None;

    // --- i32 arithmetic ---
    0x67 => I32Clz, "i32.clz", None;
    0x68 => I32Ctz, "i32.ctz", None;
    0x69 => I32Popcnt, "i32.popcnt", None;
    0x6A => I32Add, "i32.add", None;
    0x6B => I32Sub, "i32.sub", None;
    0x6C => I32Mul, "i32.mul", None;
    0x6D => I32DivS, "i32.div_s", None;
    0x6E => I32DivU, "i32.div_u", None;
    0x6F => I32RemS, "i32.rem_s", None;
    0x70 => I32RemU, "i32.rem_u", None;
    0x71 => I32And, "i32.and", None;
    0x72 => I32Or, "i32.or", None;
    0x73 => I32Xor, "i32.xor", None;
    0x74 => I32Shl, "i32.shl", None;
    0x75 => I32ShrS, "i32.shr_s", None;
    0x76 => I32ShrU, "i32.shr_u", None;
    0x77 => I32Rotl, "i32.rotl", None;
    0x78 => I32Rotr, "i32.rotr", None;

    // --- i64 arithmetic ---
    0x79 => I64Clz, "i64.clz", None;
    0x7A => I64Ctz, "i64.ctz", None;
    0x7B => I64Popcnt, "i64.popcnt", None;
    0x7C => I64Add, "i64.add", None;
    0x7D => I64Sub, "i64.sub", None;
    0x7E => I64Mul, "i64.mul", None;
    0x7F => I64DivS, "i64.div_s", None;
    0x80 => I64DivU, "i64.div_u", None;
    0x81 => I64RemS, "i64.rem_s", None;
    0x82 => I64RemU, "i64.rem_u", None;
    0x83 => I64And, "i64.and", None;
    0x84 => I64Or, "i64.or", None;
    0x85 => I64Xor, "i64.xor", None;
    0x86 => I64Shl, "i64.shl", None;
    0x87 => I64ShrS, "i64.shr_s", None;
    0x88 => I64ShrU, "i64.shr_u", None;
    0x89 => I64Rotl, "i64.rotl", None;
    0x8A => I64Rotr, "i64.rotr", None;

    // --- f32 arithmetic ---
    0x8B => F32Abs, "f32.abs", None;
    0x8C => F32Neg, "f32.neg", None;
    0x8D => F32Ceil, "f32.ceil", None;
    0x8E => F32Floor, "f32.floor", None;
    0x8F => F32Trunc, "f32.trunc", None;
    0x90 => F32Nearest, "f32.nearest", None;
    0x91 => F32Sqrt, "f32.sqrt", None;
    0x92 => F32Add, "f32.add", None;
    0x93 => F32Sub, "f32.sub", None;
    0x94 => F32Mul, "f32.mul", None;
    0x95 => F32Div, "f32.div", None;
    0x96 => F32Min, "f32.min", None;
    0x97 => F32Max, "f32.max", None;
    0x98 => F32Copysign, "f32.copysign", None;

    // --- f64 arithmetic ---
    0x99 => F64Abs, "f64.abs", None;
    0x9A => F64Neg, "f64.neg", None;
    0x9B => F64Ceil, "f64.ceil", None;
    0x9C => F64Floor, "f64.floor", None;
    0x9D => F64Trunc, "f64.trunc", None;
    0x9E => F64Nearest, "f64.nearest", None;
    0x9F => F64Sqrt, "f64.sqrt", None;
    0xA0 => F64Add, "f64.add", None;
    0xA1 => F64Sub, "f64.sub", None;
    0xA2 => F64Mul, "f64.mul", None;
    0xA3 => F64Div, "f64.div", None;
    0xA4 => F64Min, "f64.min", None;
    0xA5 => F64Max, "f64.max", None;
    0xA6 => F64Copysign, "f64.copysign", None;

    // --- Conversions ---
    0xA7 => I32WrapI64, "i32.wrap_i64", None;
    0xA8 => I32TruncF32S, "i32.trunc_f32_s", None;
    0xA9 => I32TruncF32U, "i32.trunc_f32_u", None;
    0xAA => I32TruncF64S, "i32.trunc_f64_s", None;
    0xAB => I32TruncF64U, "i32.trunc_f64_u", None;
    0xAC => I64ExtendI32S, "i64.extend_i32_s", None;
    0xAD => I64ExtendI32U, "i64.extend_i32_u", None;
    0xAE => I64TruncF32S, "i64.trunc_f32_s", None;
    0xAF => I64TruncF32U, "i64.trunc_f32_u", None;
    0xB0 => I64TruncF64S, "i64.trunc_f64_s", None;
    0xB1 => I64TruncF64U, "i64.trunc_f64_u", None;
    0xB2 => F32ConvertI32S, "f32.convert_i32_s", None;
    0xB3 => F32ConvertI32U, "f32.convert_i32_u", None;
    0xB4 => F32ConvertI64S, "f32.convert_i64_s", None;
    0xB5 => F32ConvertI64U, "f32.convert_i64_u", None;
    0xB6 => F32DemoteF64, "f32.demote_f64", None;
    0xB7 => F64ConvertI32S, "f64.convert_i32_s", None;
    0xB8 => F64ConvertI32U, "f64.convert_i32_u", None;
    0xB9 => F64ConvertI64S, "f64.convert_i64_s", None;
    0xBA => F64ConvertI64U, "f64.convert_i64_u", None;
    0xBB => F64PromoteF32, "f64.promote_f32", None;
    0xBC => I32ReinterpretF32, "i32.reinterpret_f32", None;
    0xBD => I64ReinterpretF64, "i64.reinterpret_f64", None;
    0xBE => F32ReinterpretI32, "f32.reinterpret_i32", None;
    0xBF => F64ReinterpretI64, "f64.reinterpret_i64", None;
}

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Whether this opcode opens a nested instruction sequence closed by `end`.
    pub fn opens_block(self) -> bool {
        matches!(self, Opcode::Block | Opcode::Loop | Opcode::If)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct BranchTable {
    pub targets: Vec<u32>,
    pub default: u32,
}

/// The immediate of a load or store: `flags` holds log2 of the alignment hint.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MemArg {
    pub flags: u32,
    pub offset: u32,
}

/// The decoded operand of an instruction, tagged by the shape that produced it.
#[derive(Debug, PartialEq, Clone)]
pub enum Immediate {
    None,
    Index(u32),
    BlockType(ValueType),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    BranchTable(BranchTable),
    Memory(MemArg),
    CallIndirect(TypeIdx),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Immediate,
}

impl Instruction {
    /// An instruction whose opcode takes no operand, or whose reserved operand is implied.
    pub fn simple(opcode: Opcode) -> Self {
        Self {
            opcode,
            immediate: Immediate::None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        match &self.immediate {
            Immediate::None | Immediate::BlockType(ValueType::Empty) => Ok(()),
            Immediate::Index(idx) => write!(f, " {idx}"),
            Immediate::BlockType(t) => write!(f, " (result {t})"),
            Immediate::I32(v) => write!(f, " {v}"),
            Immediate::I64(v) => write!(f, " {v}"),
            Immediate::F32(v) => write!(f, " {v}"),
            Immediate::F64(v) => write!(f, " {v}"),
            Immediate::BranchTable(table) => {
                for target in &table.targets {
                    write!(f, " {target}")?;
                }
                write!(f, " {}", table.default)
            }
            Immediate::Memory(m) => {
                if m.offset != 0 {
                    write!(f, " offset={}", m.offset)?;
                }
                match 1u64.checked_shl(m.flags) {
                    Some(align) => write!(f, " align={align}"),
                    None => write!(f, " flags={}", m.flags),
                }
            }
            Immediate::CallIndirect(t) => write!(f, " (type {t})"),
        }
    }
}

/// A constant expression: the single instruction allowed in an initializer, with its
/// terminating `end` already consumed.
///
/// <https://www.w3.org/TR/wasm-core-1/#constant-expressions>
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ConstExpr {
    GlobalGet(GlobalIdx),
    I32Const(i32),
    I64Const(i64),
    F32Const(f32),
    F64Const(f64),
}

impl From<ConstExpr> for Instruction {
    fn from(expr: ConstExpr) -> Self {
        let (opcode, immediate) = match expr {
            ConstExpr::GlobalGet(idx) => (Opcode::GlobalGet, Immediate::Index(idx.0)),
            ConstExpr::I32Const(v) => (Opcode::I32Const, Immediate::I32(v)),
            ConstExpr::I64Const(v) => (Opcode::I64Const, Immediate::I64(v)),
            ConstExpr::F32Const(v) => (Opcode::F32Const, Immediate::F32(v)),
            ConstExpr::F64Const(v) => (Opcode::F64Const, Immediate::F64(v)),
        };
        Instruction { opcode, immediate }
    }
}

impl TryFrom<Instruction> for ConstExpr {
    /// The opcode that may not appear in a constant expression.
    type Error = Opcode;

    fn try_from(instr: Instruction) -> Result<Self, Self::Error> {
        Ok(match (instr.opcode, instr.immediate) {
            (Opcode::GlobalGet, Immediate::Index(idx)) => ConstExpr::GlobalGet(GlobalIdx(idx)),
            (Opcode::I32Const, Immediate::I32(v)) => ConstExpr::I32Const(v),
            (Opcode::I64Const, Immediate::I64(v)) => ConstExpr::I64Const(v),
            (Opcode::F32Const, Immediate::F32(v)) => ConstExpr::F32Const(v),
            (Opcode::F64Const, Immediate::F64(v)) => ConstExpr::F64Const(v),
            (op, _) => return Err(op),
        })
    }
}

impl fmt::Display for ConstExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Instruction::from(*self).fmt(f)
    }
}
