//! Decoders for the MVP type grammar.
//!
//! <https://www.w3.org/TR/wasm-core-1/#types%E2%91%A0>
pub mod externkind;
pub mod functype;
pub mod globaltype;
pub mod limits;
pub mod tabletype;
pub mod valtype;

pub use externkind::InvalidExternalKindError;
pub use valtype::InvalidValueTypeError;
