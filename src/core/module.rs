use super::indices::{FuncIdx, MemIdx, TableIdx, TypeIdx};
use super::instruction::{ConstExpr, Instruction};
use super::types::{ExternalKind, FunctionType, GlobalType, MemoryType, TableType, ValueType};
use crate::decode::Reader;
use std::fmt;

/// The preamble of every module: the magic number `\0asm` followed by the format version.
///
/// <https://www.w3.org/TR/wasm-core-1/#binary-magic>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ModuleHeader {
    pub magic: u32,
    pub version: u32,
}

/// Section ids in their binary encoding order.
///
/// <https://www.w3.org/TR/wasm-core-1/#sections>
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum SectionKind {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
}

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Custom => "custom",
            SectionKind::Type => "type",
            SectionKind::Import => "import",
            SectionKind::Function => "function",
            SectionKind::Table => "table",
            SectionKind::Memory => "memory",
            SectionKind::Global => "global",
            SectionKind::Export => "export",
            SectionKind::Start => "start",
            SectionKind::Element => "element",
            SectionKind::Code => "code",
            SectionKind::Data => "data",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Each section consists of a one-byte section id, the u32 size of the contents (in bytes),
/// and the actual contents, whose structure is dependent on the section id.
///
/// `offset` is the position of the first content byte. `name` is only set for custom sections.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub length: u32,
    pub offset: usize,
    pub name: Option<String>,
}

impl Section {
    /// The offset one past the last content byte.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length as usize)
    }
}

/// The descriptor of an import, tagged by the external kind read from the wire.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ImportKind {
    Function(TypeIdx),
    Table(TableType),
    Memory(MemoryType),
    Global(GlobalType),
}

impl ImportKind {
    pub fn external_kind(&self) -> ExternalKind {
        match self {
            ImportKind::Function(_) => ExternalKind::Function,
            ImportKind::Table(_) => ExternalKind::Table,
            ImportKind::Memory(_) => ExternalKind::Memory,
            ImportKind::Global(_) => ExternalKind::Global,
        }
    }
}

/// <https://www.w3.org/TR/wasm-core-1/#binary-importsec>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ImportEntry {
    pub module: String,
    pub field: String,
    pub kind: ImportKind,
}

/// <https://www.w3.org/TR/wasm-core-1/#binary-exportsec>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExportEntry {
    pub field: String,
    pub kind: ExternalKind,
    pub index: u32,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct GlobalEntry {
    pub ty: GlobalType,
    pub init: ConstExpr,
}

/// The header of an element segment. Its function indices follow as separate events.
///
/// <https://www.w3.org/TR/wasm-core-1/#binary-elemsec>
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ElementEntry {
    pub table_index: TableIdx,
    pub offset: ConstExpr,
    pub element_count: u32,
}

/// A data segment borrowing its initializer bytes from the input.
///
/// <https://www.w3.org/TR/wasm-core-1/#binary-datasec>
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataSegment<'a> {
    pub memory_index: MemIdx,
    pub offset: ConstExpr,
    pub data: &'a [u8],
}

/// A run of `count` locals sharing one type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LocalEntry {
    pub count: u32,
    pub value_type: ValueType,
}

/// A function body whose local declarations have been decoded but whose instructions have not.
///
/// `offset` is the position of the body's size field, `size` the byte length that follows it.
#[derive(Debug, Clone)]
pub struct FunctionBody<'a> {
    pub index: u32,
    pub size: u32,
    pub offset: usize,
    pub locals: Vec<LocalEntry>,
    pub(crate) code: Reader<'a>,
}

impl<'a> FunctionBody<'a> {
    /// A cursor over the undecoded instruction bytes, positioned at the first opcode.
    pub fn code(&self) -> Reader<'a> {
        self.code
    }

    /// The total number of locals declared, excluding parameters.
    pub fn local_count(&self) -> u64 {
        self.locals.iter().map(|l| u64::from(l.count)).sum()
    }
}

/// A custom section kept by [`ModuleBuilder`](crate::visitor::ModuleBuilder).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CustomSection {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Element {
    pub table_index: TableIdx,
    pub offset: ConstExpr,
    pub functions: Vec<FuncIdx>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub locals: Vec<LocalEntry>,
    /// Every instruction of the body, including its final `end`.
    pub body: Vec<Instruction>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Data {
    pub memory_index: MemIdx,
    pub offset: ConstExpr,
    pub bytes: Vec<u8>,
}

/// An owned, fully decoded module as accumulated by
/// [`ModuleBuilder`](crate::visitor::ModuleBuilder).
///
/// The decoder itself never builds one; this is what a visitor that wants the whole module
/// in memory ends up with.
///
/// <https://www.w3.org/TR/wasm-core-1/#modules>
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Module {
    pub version: u32,

    /// Every section in wire order, custom sections included.
    pub sections: Vec<Section>,

    pub custom_sections: Vec<CustomSection>,

    pub types: Vec<FunctionType>,

    pub imports: Vec<ImportEntry>,

    /// The type index of each function defined (not imported) by the module.
    pub functions: Vec<TypeIdx>,

    pub tables: Vec<TableType>,

    pub memories: Vec<MemoryType>,

    pub globals: Vec<GlobalEntry>,

    pub exports: Vec<ExportEntry>,

    pub start: Option<FuncIdx>,

    pub elements: Vec<Element>,

    pub code: Vec<Function>,

    pub data: Vec<Data>,
}

impl Module {
    /// The number of imports of the given kind; defined entities are indexed after these.
    pub fn imported(&self, kind: ExternalKind) -> usize {
        self.imports
            .iter()
            .filter(|i| i.kind.external_kind() == kind)
            .count()
    }

    /// The signature of the function at `idx` in the function index space, imports first.
    pub fn function_type(&self, idx: FuncIdx) -> Option<&FunctionType> {
        let idx = idx.0 as usize;
        let type_idx = self
            .imports
            .iter()
            .filter_map(|i| match i.kind {
                ImportKind::Function(t) => Some(t),
                _ => None,
            })
            .chain(self.functions.iter().copied())
            .nth(idx)?;
        self.types.get(type_idx.0 as usize)
    }
}
