//! A streaming decoder for WebAssembly modules in the binary format.
//!
//! This library implements the binary format of the WebAssembly MVP [specification]. Instead
//! of building a module in memory, the decoder validates the header, walks the sections in
//! wire order and pushes every record it reads into a [`Visitor`]. Function bodies are handed
//! over with their locals decoded and their instructions left as a bounded cursor, which the
//! visitor may decode through [`FunctionBody::instructions`] or skip.
//!
//! The main entry points are [`decode()`], for driving a visitor, and [`decode_module()`], for
//! an owned [`Module`].
//!
//! ```
//! use wavisit::visitor::SectionSizes;
//!
//! // header + an empty type section
//! let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00];
//! let mut sizes = SectionSizes::new();
//! wavisit::decode(&bytes, &mut sizes)?;
//! assert_eq!(sizes.sections.len(), 1);
//! # Ok::<(), wavisit::DecodeError>(())
//! ```
//!
//! [specification]: https://www.w3.org/TR/wasm-core-1/
#![forbid(unsafe_code)]

pub mod core;
pub mod decode;
pub mod visitor;

pub use crate::core::{FunctionBody, Module, Section, SectionKind};
pub use crate::decode::{
    DecodeError, Decoder, DecoderConfig, ErrorKind, Reader, decode, decode_module,
};
pub use crate::visitor::{NoOpVisitor, Visitor};
