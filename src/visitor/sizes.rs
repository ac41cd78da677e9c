use crate::core::{Section, SectionKind};
use crate::decode::DecodeError;
use crate::visitor::Visitor;

/// Magic number and version.
const HEADER_SIZE: usize = 8;

/// Where one section sits in the module.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SectionSize {
    pub kind: SectionKind,
    pub name: Option<String>,
    /// Offset of the first content byte.
    pub offset: usize,
    pub length: u32,
}

/// Computes the size of a module and the extent of each of its sections from section
/// boundaries alone.
#[derive(Debug, Default, Clone)]
pub struct SectionSizes {
    pub sections: Vec<SectionSize>,
    pub module_size: usize,
}

impl SectionSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total content bytes of every section of `kind`.
    pub fn total(&self, kind: SectionKind) -> u64 {
        self.sections
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| u64::from(s.length))
            .sum()
    }
}

impl Visitor for SectionSizes {
    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.sections.push(SectionSize {
            kind: section.kind,
            name: section.name.clone(),
            offset: section.offset,
            length: section.length,
        });
        self.module_size = section.end();
        Ok(())
    }

    fn module_end(&mut self) -> Result<(), DecodeError> {
        self.module_size = self.module_size.max(HEADER_SIZE);
        Ok(())
    }
}
