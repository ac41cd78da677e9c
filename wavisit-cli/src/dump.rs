use std::fmt::Write as _;

use wavisit::core::indices::{FuncIdx, TypeIdx};
use wavisit::core::instruction::{ConstExpr, Opcode};
use wavisit::core::types::{
    ExternalKind, FunctionType, GlobalType, MemoryType, ResizableLimits, TableType,
};
use wavisit::core::{
    DataSegment, ElementEntry, ExportEntry, FunctionBody, GlobalEntry, ImportEntry, ImportKind,
    Section,
};
use wavisit::{DecodeError, Visitor};

/// Renders a module as an s-expression listing, one top-level entry per line.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    verbose: bool,
    disassemble: bool,
    indent: usize,
    imported_functions: u32,
    function_types: Vec<TypeIdx>,
}

impl Printer {
    pub fn new(verbose: bool, disassemble: bool) -> Self {
        Self {
            verbose,
            disassemble,
            ..Self::default()
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn count(&mut self, count: u32) {
        if self.verbose {
            self.line(format!(";; count: {count}"));
        }
    }

    fn disassemble(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        let base = self.indent + 1;
        let mut instructions = body.instructions();
        loop {
            let outer = instructions.depth();
            let Some(instr) = instructions.next() else {
                break;
            };
            let instr = instr?;
            // `else` and `end` line up with the instruction that opened their block
            let level = match instr.opcode {
                Opcode::End if outer == 0 => break,
                Opcode::End | Opcode::Else => outer - 1,
                _ => outer,
            };
            self.indent = base + level;
            self.line(instr.to_string());
        }
        self.indent = base - 1;
        Ok(())
    }
}

fn limits(l: &ResizableLimits) -> String {
    match l.maximum {
        Some(max) => format!("{} {max}", l.initial),
        None => l.initial.to_string(),
    }
}

fn global_type(g: &GlobalType) -> String {
    if g.mutable {
        format!("(mut {})", g.content_type)
    } else {
        g.content_type.to_string()
    }
}

fn table_type(t: &TableType) -> String {
    format!("{} {}", limits(&t.limits), t.element_type)
}

fn func_type(t: &FunctionType) -> String {
    let mut s = String::from("(func");
    if !t.params.is_empty() {
        s.push_str(" (param");
        for p in &t.params {
            let _ = write!(s, " {p}");
        }
        s.push(')');
    }
    if let Some(r) = t.result {
        let _ = write!(s, " (result {r})");
    }
    s.push(')');
    s
}

fn const_expr(e: &ConstExpr) -> String {
    format!("({e})")
}

/// Quotes `bytes` the way the text format writes string literals.
fn quoted(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() + 2);
    s.push('"');
    for &b in bytes {
        match b {
            b'"' => s.push_str("\\\""),
            b'\\' => s.push_str("\\\\"),
            0x20..=0x7E => s.push(char::from(b)),
            _ => {
                let _ = write!(s, "\\{b:02x}");
            }
        }
    }
    s.push('"');
    s
}

impl Visitor for Printer {
    fn module_start(&mut self) -> Result<(), DecodeError> {
        self.line("(module");
        self.indent += 1;
        Ok(())
    }

    fn module_end(&mut self) -> Result<(), DecodeError> {
        self.indent -= 1;
        self.line(")");
        Ok(())
    }

    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        if self.verbose {
            self.line(format!(
                ";;;;;;;;;;;;;; {} section ({} bytes at {:#x})",
                section.kind, section.length, section.offset
            ));
        }
        Ok(())
    }

    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        self.line(format!(
            "(@custom {} ;; {} bytes",
            quoted(section.name.as_deref().unwrap_or_default().as_bytes()),
            payload.len()
        ));
        self.line(")");
        Ok(())
    }

    fn type_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn type_entry(&mut self, index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        self.line(format!("(type (;{index};) {})", func_type(ty)));
        Ok(())
    }

    fn import_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn import_entry(&mut self, _index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        let desc = match &entry.kind {
            ImportKind::Function(t) => {
                self.imported_functions += 1;
                format!("(func (type {t}))")
            }
            ImportKind::Table(t) => format!("(table {})", table_type(t)),
            ImportKind::Memory(m) => format!("(memory {})", limits(&m.limits)),
            ImportKind::Global(g) => format!("(global {})", global_type(g)),
        };
        self.line(format!(
            "(import {} {} {desc})",
            quoted(entry.module.as_bytes()),
            quoted(entry.field.as_bytes())
        ));
        Ok(())
    }

    fn function_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn function_entry(&mut self, _index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        self.function_types.push(type_index);
        Ok(())
    }

    fn table_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn table_entry(&mut self, index: u32, table: &TableType) -> Result<(), DecodeError> {
        self.line(format!("(table (;{index};) {})", table_type(table)));
        Ok(())
    }

    fn memory_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn memory_entry(&mut self, index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        self.line(format!("(memory (;{index};) {})", limits(&memory.limits)));
        Ok(())
    }

    fn global_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn global_entry(&mut self, index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        self.line(format!(
            "(global (;{index};) {} {})",
            global_type(&global.ty),
            const_expr(&global.init)
        ));
        Ok(())
    }

    fn export_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn export_entry(&mut self, _index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        let kind = match entry.kind {
            ExternalKind::Function => "func",
            ExternalKind::Table => "table",
            ExternalKind::Memory => "memory",
            ExternalKind::Global => "global",
        };
        self.line(format!(
            "(export {} ({kind} {}))",
            quoted(entry.field.as_bytes()),
            entry.index
        ));
        Ok(())
    }

    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        self.line(format!("(start {function})"));
        Ok(())
    }

    fn element_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn element_entry(&mut self, _index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        let table = if entry.table_index.0 == 0 {
            String::new()
        } else {
            format!(" (table {})", entry.table_index)
        };
        self.line(format!("(elem{table} {}", const_expr(&entry.offset)));
        self.indent += 1;
        Ok(())
    }

    fn element(&mut self, _index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        self.line(function.to_string());
        Ok(())
    }

    fn element_entry_end(&mut self, _index: u32, _entry: &ElementEntry) -> Result<(), DecodeError> {
        self.indent -= 1;
        self.line(")");
        Ok(())
    }

    fn code_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        let func_index = self.imported_functions + body.index;
        let mut header = format!("(func (;{func_index};)");
        if let Some(t) = self.function_types.get(body.index as usize) {
            let _ = write!(header, " (type {t})");
        }
        if !body.locals.is_empty() {
            header.push_str(" (local");
            for local in &body.locals {
                for _ in 0..local.count {
                    let _ = write!(header, " {}", local.value_type);
                }
            }
            header.push(')');
        }
        self.line(header);

        if self.disassemble {
            self.disassemble(body)?;
        }
        Ok(())
    }

    fn function_body_end(&mut self, _body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        self.line(")");
        Ok(())
    }

    fn data_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.count(count);
        Ok(())
    }

    fn data_segment(&mut self, _index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        self.line(format!(
            "(data {} {})",
            const_expr(&segment.offset),
            quoted(segment.data)
        ));
        Ok(())
    }
}
