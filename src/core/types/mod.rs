//! Type definitions for the MVP type grammar.
//!
//! <https://www.w3.org/TR/wasm-core-1/#types>
pub mod externkind;
pub use externkind::ExternalKind;

pub mod functype;
pub use functype::FunctionType;

pub mod globaltype;
pub use globaltype::GlobalType;

pub mod limits;
pub use limits::ResizableLimits;

pub mod tabletype;
pub use tabletype::{MemoryType, TableType};

pub mod valtype;
pub use valtype::ValueType;
