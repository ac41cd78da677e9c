use crate::core::indices::{FuncIdx, TypeIdx};
use crate::core::types::{FunctionType, MemoryType, TableType};
use crate::core::{
    DataSegment, ElementEntry, ExportEntry, FunctionBody, GlobalEntry, ImportEntry, ModuleHeader,
    Section,
};
use crate::decode::DecodeError;
use crate::visitor::Visitor;

/// Forwards every event to `first`, then to `second`. An error from `first` stops the event
/// from reaching `second`.
///
/// Pass `&mut` visitors to keep access to them after decoding:
///
/// ```
/// use wavisit::visitor::{ModuleBuilder, SectionSizes, Tee};
///
/// let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00];
/// let (mut builder, mut sizes) = (ModuleBuilder::new(), SectionSizes::new());
/// wavisit::decode(&bytes, &mut Tee::new(&mut builder, &mut sizes))?;
/// assert_eq!(sizes.module_size, bytes.len());
/// assert_eq!(builder.module().sections.len(), 1);
/// # Ok::<(), wavisit::DecodeError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Visitor, B: Visitor> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Visitor, B: Visitor> Visitor for Tee<A, B> {
    fn module_start(&mut self) -> Result<(), DecodeError> {
        self.first.module_start()?;
        self.second.module_start()
    }

    fn module_end(&mut self) -> Result<(), DecodeError> {
        self.first.module_end()?;
        self.second.module_end()
    }

    fn header(&mut self, header: &ModuleHeader) -> Result<(), DecodeError> {
        self.first.header(header)?;
        self.second.header(header)
    }

    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.first.section_start(section)?;
        self.second.section_start(section)
    }

    fn section_end(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.first.section_end(section)?;
        self.second.section_end(section)
    }

    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        self.first.custom_section(section, payload)?;
        self.second.custom_section(section, payload)
    }

    fn type_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.type_section(count)?;
        self.second.type_section(count)
    }

    fn type_entry(&mut self, index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        self.first.type_entry(index, ty)?;
        self.second.type_entry(index, ty)
    }

    fn import_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.import_section(count)?;
        self.second.import_section(count)
    }

    fn import_entry(&mut self, index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        self.first.import_entry(index, entry)?;
        self.second.import_entry(index, entry)
    }

    fn function_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.function_section(count)?;
        self.second.function_section(count)
    }

    fn function_entry(&mut self, index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        self.first.function_entry(index, type_index)?;
        self.second.function_entry(index, type_index)
    }

    fn table_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.table_section(count)?;
        self.second.table_section(count)
    }

    fn table_entry(&mut self, index: u32, table: &TableType) -> Result<(), DecodeError> {
        self.first.table_entry(index, table)?;
        self.second.table_entry(index, table)
    }

    fn memory_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.memory_section(count)?;
        self.second.memory_section(count)
    }

    fn memory_entry(&mut self, index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        self.first.memory_entry(index, memory)?;
        self.second.memory_entry(index, memory)
    }

    fn global_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.global_section(count)?;
        self.second.global_section(count)
    }

    fn global_entry(&mut self, index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        self.first.global_entry(index, global)?;
        self.second.global_entry(index, global)
    }

    fn export_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.export_section(count)?;
        self.second.export_section(count)
    }

    fn export_entry(&mut self, index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        self.first.export_entry(index, entry)?;
        self.second.export_entry(index, entry)
    }

    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        self.first.start_function(function)?;
        self.second.start_function(function)
    }

    fn element_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.element_section(count)?;
        self.second.element_section(count)
    }

    fn element_entry(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        self.first.element_entry(index, entry)?;
        self.second.element_entry(index, entry)
    }

    fn element(&mut self, index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        self.first.element(index, function)?;
        self.second.element(index, function)
    }

    fn element_entry_end(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        self.first.element_entry_end(index, entry)?;
        self.second.element_entry_end(index, entry)
    }

    fn code_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.code_section(count)?;
        self.second.code_section(count)
    }

    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        self.first.function_body(body)?;
        self.second.function_body(body)
    }

    fn function_body_end(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        self.first.function_body_end(body)?;
        self.second.function_body_end(body)
    }

    fn data_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.first.data_section(count)?;
        self.second.data_section(count)
    }

    fn data_segment(&mut self, index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        self.first.data_segment(index, segment)?;
        self.second.data_segment(index, segment)
    }
}
