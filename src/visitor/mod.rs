//! The output side of decoding.
//!
//! A [`Decoder`](crate::decode::Decoder) pushes every record it reads into a [`Visitor`], in
//! wire order, and keeps nothing for itself. A visitor that wants a module in memory has to
//! build it (see [`ModuleBuilder`]).
//!
//! Ordering contract:
//! - `module_start` and `header` come first, `module_end` comes last.
//! - every section is bracketed by `section_start`/`section_end`, with nothing from another
//!   section in between;
//! - a section's `*_section(count)` call precedes its `count` entry calls;
//! - an element entry is followed by its `element` calls and then `element_entry_end`;
//! - `function_body` is immediately followed by `function_body_end` for the same body.
//!
//! Returning an error from any method aborts decoding and the error is handed back to the
//! caller unchanged.
use crate::core::indices::{FuncIdx, TypeIdx};
use crate::core::types::{FunctionType, MemoryType, TableType};
use crate::core::{
    DataSegment, ElementEntry, ExportEntry, FunctionBody, GlobalEntry, ImportEntry, ModuleHeader,
    Section,
};
use crate::decode::DecodeError;

mod builder;
mod sizes;
mod tee;

pub use builder::ModuleBuilder;
pub use sizes::{SectionSize, SectionSizes};
pub use tee::Tee;

/// A sink of decode events. Every method defaults to doing nothing, so an implementation only
/// overrides the events it cares about.
///
/// Entry indices are positions within their section, starting at zero.
#[allow(unused_variables)]
pub trait Visitor {
    fn module_start(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }

    fn module_end(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }

    fn header(&mut self, header: &ModuleHeader) -> Result<(), DecodeError> {
        Ok(())
    }

    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        Ok(())
    }

    fn section_end(&mut self, section: &Section) -> Result<(), DecodeError> {
        Ok(())
    }

    /// The payload of a custom section, following its name. The decoder skips it afterwards.
    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        Ok(())
    }

    fn type_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn type_entry(&mut self, index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        Ok(())
    }

    fn import_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn import_entry(&mut self, index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        Ok(())
    }

    fn function_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn function_entry(&mut self, index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        Ok(())
    }

    fn table_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn table_entry(&mut self, index: u32, table: &TableType) -> Result<(), DecodeError> {
        Ok(())
    }

    fn memory_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn memory_entry(&mut self, index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        Ok(())
    }

    fn global_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn global_entry(&mut self, index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        Ok(())
    }

    fn export_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn export_entry(&mut self, index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        Ok(())
    }

    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        Ok(())
    }

    fn element_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn element_entry(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        Ok(())
    }

    /// One function index of the element entry most recently started.
    fn element(&mut self, index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        Ok(())
    }

    fn element_entry_end(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        Ok(())
    }

    fn code_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    /// A function body with its locals decoded. Its instructions can be decoded on the spot
    /// through [`FunctionBody::instructions`], or not at all.
    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        Ok(())
    }

    fn function_body_end(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        Ok(())
    }

    fn data_section(&mut self, count: u32) -> Result<(), DecodeError> {
        Ok(())
    }

    fn data_segment(&mut self, index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        Ok(())
    }
}

/// A visitor that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpVisitor;

impl Visitor for NoOpVisitor {}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn module_start(&mut self) -> Result<(), DecodeError> {
        (**self).module_start()
    }

    fn module_end(&mut self) -> Result<(), DecodeError> {
        (**self).module_end()
    }

    fn header(&mut self, header: &ModuleHeader) -> Result<(), DecodeError> {
        (**self).header(header)
    }

    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        (**self).section_start(section)
    }

    fn section_end(&mut self, section: &Section) -> Result<(), DecodeError> {
        (**self).section_end(section)
    }

    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        (**self).custom_section(section, payload)
    }

    fn type_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).type_section(count)
    }

    fn type_entry(&mut self, index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        (**self).type_entry(index, ty)
    }

    fn import_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).import_section(count)
    }

    fn import_entry(&mut self, index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        (**self).import_entry(index, entry)
    }

    fn function_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).function_section(count)
    }

    fn function_entry(&mut self, index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        (**self).function_entry(index, type_index)
    }

    fn table_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).table_section(count)
    }

    fn table_entry(&mut self, index: u32, table: &TableType) -> Result<(), DecodeError> {
        (**self).table_entry(index, table)
    }

    fn memory_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).memory_section(count)
    }

    fn memory_entry(&mut self, index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        (**self).memory_entry(index, memory)
    }

    fn global_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).global_section(count)
    }

    fn global_entry(&mut self, index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        (**self).global_entry(index, global)
    }

    fn export_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).export_section(count)
    }

    fn export_entry(&mut self, index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        (**self).export_entry(index, entry)
    }

    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        (**self).start_function(function)
    }

    fn element_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).element_section(count)
    }

    fn element_entry(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        (**self).element_entry(index, entry)
    }

    fn element(&mut self, index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        (**self).element(index, function)
    }

    fn element_entry_end(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        (**self).element_entry_end(index, entry)
    }

    fn code_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).code_section(count)
    }

    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        (**self).function_body(body)
    }

    fn function_body_end(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        (**self).function_body_end(body)
    }

    fn data_section(&mut self, count: u32) -> Result<(), DecodeError> {
        (**self).data_section(count)
    }

    fn data_segment(&mut self, index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        (**self).data_segment(index, segment)
    }
}
