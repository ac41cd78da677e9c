//! Plain data produced by the decoder and handed to a [`Visitor`](crate::visitor::Visitor).
pub mod indices;
pub mod instruction;
pub mod types;

mod module;
pub use module::{
    CustomSection, Data, DataSegment, Element, ElementEntry, ExportEntry, Function,
    FunctionBody, GlobalEntry, ImportEntry, ImportKind, LocalEntry, Module, ModuleHeader,
    Section, SectionKind,
};
