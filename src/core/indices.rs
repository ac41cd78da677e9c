//! Type definitions for WebAssembly indices.
//!
//! See <https://www.w3.org/TR/wasm-core-1/#indices>

macro_rules! define_index_type {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_index_type!(TypeIdx);
define_index_type!(FuncIdx);
define_index_type!(TableIdx);
define_index_type!(MemIdx);
define_index_type!(GlobalIdx);
