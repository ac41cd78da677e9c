use crate::core::indices::{FuncIdx, TypeIdx};
use crate::core::types::{FunctionType, MemoryType, TableType};
use crate::core::{
    CustomSection, Data, DataSegment, Element, ElementEntry, ExportEntry, Function, FunctionBody,
    GlobalEntry, ImportEntry, Module, ModuleHeader, Section,
};
use crate::decode::DecodeError;
use crate::visitor::Visitor;

/// A visitor that accumulates everything it is shown into an owned [`Module`], decoding each
/// function body's instructions as the body goes by.
///
/// ```
/// use wavisit::visitor::ModuleBuilder;
///
/// let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
/// let mut builder = ModuleBuilder::new();
/// wavisit::decode(&bytes, &mut builder)?;
/// let module = builder.finish();
/// assert_eq!(module.version, 1);
/// assert!(module.sections.is_empty());
/// # Ok::<(), wavisit::DecodeError>(())
/// ```
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    module: Module,
    element: Option<Element>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// What has been accumulated so far.
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn finish(self) -> Module {
        self.module
    }
}

impl Visitor for ModuleBuilder {
    fn header(&mut self, header: &ModuleHeader) -> Result<(), DecodeError> {
        self.module.version = header.version;
        Ok(())
    }

    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.module.sections.push(section.clone());
        Ok(())
    }

    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        self.module.custom_sections.push(CustomSection {
            name: section.name.clone().unwrap_or_default(),
            data: payload.to_vec(),
        });
        Ok(())
    }

    fn type_entry(&mut self, _index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        self.module.types.push(ty.clone());
        Ok(())
    }

    fn import_entry(&mut self, _index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        self.module.imports.push(entry.clone());
        Ok(())
    }

    fn function_entry(&mut self, _index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        self.module.functions.push(type_index);
        Ok(())
    }

    fn table_entry(&mut self, _index: u32, table: &TableType) -> Result<(), DecodeError> {
        self.module.tables.push(*table);
        Ok(())
    }

    fn memory_entry(&mut self, _index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        self.module.memories.push(*memory);
        Ok(())
    }

    fn global_entry(&mut self, _index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        self.module.globals.push(*global);
        Ok(())
    }

    fn export_entry(&mut self, _index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        self.module.exports.push(entry.clone());
        Ok(())
    }

    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        self.module.start = Some(function);
        Ok(())
    }

    fn element_entry(&mut self, _index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        self.element = Some(Element {
            table_index: entry.table_index,
            offset: entry.offset,
            functions: Vec::new(),
        });
        Ok(())
    }

    fn element(&mut self, _index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        if let Some(element) = self.element.as_mut() {
            element.functions.push(function);
        }
        Ok(())
    }

    fn element_entry_end(&mut self, _index: u32, _entry: &ElementEntry) -> Result<(), DecodeError> {
        if let Some(element) = self.element.take() {
            self.module.elements.push(element);
        }
        Ok(())
    }

    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        let instructions = body.instructions().collect::<Result<Vec<_>, _>>()?;
        self.module.code.push(Function {
            locals: body.locals.clone(),
            body: instructions,
        });
        Ok(())
    }

    fn data_segment(&mut self, _index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        self.module.data.push(Data {
            memory_index: segment.memory_index,
            offset: segment.offset,
            bytes: segment.data.to_vec(),
        });
        Ok(())
    }
}
