use std::fmt;

/// The kind of definition an import or export refers to.
///
/// <https://www.w3.org/TR/wasm-core-1/#binary-exportdesc>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ExternalKind {
    Function,
    Table,
    Memory,
    Global,
}

impl fmt::Display for ExternalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExternalKind::Function => "func",
            ExternalKind::Table => "table",
            ExternalKind::Memory => "memory",
            ExternalKind::Global => "global",
        })
    }
}
