use pretty_assertions::assert_eq;
use wavisit::core::indices::*;
use wavisit::core::instruction::{ConstExpr, Immediate, Instruction, Opcode};
use wavisit::core::types::{
    ExternalKind, FunctionType, GlobalType, MemoryType, ResizableLimits, TableType, ValueType,
};
use wavisit::core::*;
use wavisit::visitor::{SectionSizes, Tee};
use wavisit::*;

/// Every decode event, flattened into something comparable.
#[derive(Debug, PartialEq, Clone)]
enum Event {
    ModuleStart,
    ModuleEnd,
    Header(u32),
    SectionStart(SectionKind, Option<String>),
    SectionEnd(SectionKind),
    Custom(String, Vec<u8>),
    Count(&'static str, u32),
    Type(u32, FunctionType),
    Import(u32, ImportEntry),
    Function(u32, TypeIdx),
    Table(u32, TableType),
    Memory(u32, MemoryType),
    Global(u32, GlobalEntry),
    Export(u32, ExportEntry),
    Start(FuncIdx),
    ElementEntry(u32, u32),
    Element(u32, FuncIdx),
    ElementEntryEnd(u32),
    Body(u32, Vec<LocalEntry>, Vec<u8>),
    BodyEnd(u32),
    Data(u32, MemIdx, Vec<u8>),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    fn push(&mut self, e: Event) -> Result<(), DecodeError> {
        self.events.push(e);
        Ok(())
    }
}

impl Visitor for Recorder {
    fn module_start(&mut self) -> Result<(), DecodeError> {
        self.push(Event::ModuleStart)
    }
    fn module_end(&mut self) -> Result<(), DecodeError> {
        self.push(Event::ModuleEnd)
    }
    fn header(&mut self, header: &ModuleHeader) -> Result<(), DecodeError> {
        self.push(Event::Header(header.version))
    }
    fn section_start(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.push(Event::SectionStart(section.kind, section.name.clone()))
    }
    fn section_end(&mut self, section: &Section) -> Result<(), DecodeError> {
        self.push(Event::SectionEnd(section.kind))
    }
    fn custom_section(&mut self, section: &Section, payload: &[u8]) -> Result<(), DecodeError> {
        let name = section.name.clone().unwrap_or_default();
        self.push(Event::Custom(name, payload.to_vec()))
    }
    fn type_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("type", count))
    }
    fn type_entry(&mut self, index: u32, ty: &FunctionType) -> Result<(), DecodeError> {
        self.push(Event::Type(index, ty.clone()))
    }
    fn import_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("import", count))
    }
    fn import_entry(&mut self, index: u32, entry: &ImportEntry) -> Result<(), DecodeError> {
        self.push(Event::Import(index, entry.clone()))
    }
    fn function_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("function", count))
    }
    fn function_entry(&mut self, index: u32, type_index: TypeIdx) -> Result<(), DecodeError> {
        self.push(Event::Function(index, type_index))
    }
    fn table_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("table", count))
    }
    fn table_entry(&mut self, index: u32, table: &TableType) -> Result<(), DecodeError> {
        self.push(Event::Table(index, *table))
    }
    fn memory_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("memory", count))
    }
    fn memory_entry(&mut self, index: u32, memory: &MemoryType) -> Result<(), DecodeError> {
        self.push(Event::Memory(index, *memory))
    }
    fn global_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("global", count))
    }
    fn global_entry(&mut self, index: u32, global: &GlobalEntry) -> Result<(), DecodeError> {
        self.push(Event::Global(index, *global))
    }
    fn export_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("export", count))
    }
    fn export_entry(&mut self, index: u32, entry: &ExportEntry) -> Result<(), DecodeError> {
        self.push(Event::Export(index, entry.clone()))
    }
    fn start_function(&mut self, function: FuncIdx) -> Result<(), DecodeError> {
        self.push(Event::Start(function))
    }
    fn element_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("element", count))
    }
    fn element_entry(&mut self, index: u32, entry: &ElementEntry) -> Result<(), DecodeError> {
        self.push(Event::ElementEntry(index, entry.element_count))
    }
    fn element(&mut self, index: u32, function: FuncIdx) -> Result<(), DecodeError> {
        self.push(Event::Element(index, function))
    }
    fn element_entry_end(&mut self, index: u32, _entry: &ElementEntry) -> Result<(), DecodeError> {
        self.push(Event::ElementEntryEnd(index))
    }
    fn code_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("code", count))
    }
    fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        let code = body.code().remaining_bytes().to_vec();
        self.push(Event::Body(body.index, body.locals.clone(), code))
    }
    fn function_body_end(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
        self.push(Event::BodyEnd(body.index))
    }
    fn data_section(&mut self, count: u32) -> Result<(), DecodeError> {
        self.push(Event::Count("data", count))
    }
    fn data_segment(&mut self, index: u32, segment: &DataSegment<'_>) -> Result<(), DecodeError> {
        self.push(Event::Data(index, segment.memory_index, segment.data.to_vec()))
    }
}

const HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

fn module(sections: &[&[u8]]) -> Vec<u8> {
    let mut bytes = HEADER.to_vec();
    for s in sections {
        bytes.extend_from_slice(s);
    }
    bytes
}

fn record(bytes: &[u8]) -> Vec<Event> {
    let mut recorder = Recorder::default();
    decode(bytes, &mut recorder).unwrap();
    recorder.events
}

fn i32_const(v: i32) -> ConstExpr {
    ConstExpr::I32Const(v)
}

#[test]
fn it_reports_empty_module() {
    assert_eq!(
        record(&HEADER),
        vec![Event::ModuleStart, Event::Header(1), Event::ModuleEnd]
    );
}

#[test]
fn it_reports_header_once_before_sections() {
    let events = record(&module(&[&[0x01, 0x01, 0x00], &[0x03, 0x01, 0x00]]));
    let headers: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Event::Header(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(headers, vec![1]);
    assert_eq!(events[2], Event::SectionStart(SectionKind::Type, None));
}

#[test]
fn it_pairs_type_section_events() {
    // (type (func (param i32 i32) (result i32))) (type (func))
    let bytes = module(&[&[
        0x01, 0x0A, 0x02, 0x60, 0x02, 0x7F, 0x7F, 0x01, 0x7F, 0x60, 0x00, 0x00,
    ]]);

    assert_eq!(
        record(&bytes),
        vec![
            Event::ModuleStart,
            Event::Header(1),
            Event::SectionStart(SectionKind::Type, None),
            Event::Count("type", 2),
            Event::Type(
                0,
                FunctionType {
                    params: vec![ValueType::I32, ValueType::I32],
                    result: Some(ValueType::I32),
                }
            ),
            Event::Type(1, FunctionType::default()),
            Event::SectionEnd(SectionKind::Type),
            Event::ModuleEnd,
        ]
    );
}

#[test]
fn it_skips_name_section_and_keeps_decoding() {
    let name_section: &[u8] = &[
        0x00, 0x09, 0x04, b'n', b'a', b'm', b'e', 0x01, 0x02, 0x03, 0x04,
    ];
    let export_section: &[u8] = &[
        0x07, 0x0C, 0x02, // two exports
        0x03, b'm', b'e', b'm', 0x02, 0x00, // "mem" memory 0
        0x02, b'f', b'n', 0x00, 0x01, // "fn" func 1
    ];
    let events = record(&module(&[name_section, export_section]));

    assert_eq!(
        events[2..],
        [
            Event::SectionStart(SectionKind::Custom, Some("name".to_owned())),
            Event::Custom("name".to_owned(), vec![0x01, 0x02, 0x03, 0x04]),
            Event::SectionEnd(SectionKind::Custom),
            Event::SectionStart(SectionKind::Export, None),
            Event::Count("export", 2),
            Event::Export(
                0,
                ExportEntry {
                    field: "mem".to_owned(),
                    kind: ExternalKind::Memory,
                    index: 0,
                }
            ),
            Event::Export(
                1,
                ExportEntry {
                    field: "fn".to_owned(),
                    kind: ExternalKind::Function,
                    index: 1,
                }
            ),
            Event::SectionEnd(SectionKind::Export),
            Event::ModuleEnd,
        ]
    );
}

#[test]
fn it_reports_every_section_kind_in_wire_order() {
    let bytes = module(&[
        // type: (func (param i32))
        &[0x01, 0x05, 0x01, 0x60, 0x01, 0x7F, 0x00],
        // import: "env" "g" (global i32)
        &[0x02, 0x0A, 0x01, 0x03, b'e', b'n', b'v', 0x01, b'g', 0x03, 0x7F, 0x00],
        // function: one of type 0
        &[0x03, 0x02, 0x01, 0x00],
        // table: anyfunc 1..
        &[0x04, 0x04, 0x01, 0x70, 0x00, 0x01],
        // memory: 1..2
        &[0x05, 0x04, 0x01, 0x01, 0x01, 0x02],
        // global: (mut i64) (i64.const -1)
        &[0x06, 0x06, 0x01, 0x7E, 0x01, 0x42, 0x7F, 0x0B],
        // start: func 0
        &[0x08, 0x01, 0x00],
        // element: table 0, offset (i32.const 0), [0, 0]
        &[0x09, 0x08, 0x01, 0x00, 0x41, 0x00, 0x0B, 0x02, 0x00, 0x00],
        // code: one body, 1 local i64, `nop end`
        &[0x0A, 0x07, 0x01, 0x05, 0x01, 0x01, 0x7E, 0x01, 0x0B],
        // data: memory 0, offset (i32.const 8), "hi"
        &[0x0B, 0x08, 0x01, 0x00, 0x41, 0x08, 0x0B, 0x02, b'h', b'i'],
    ]);

    assert_eq!(
        record(&bytes),
        vec![
            Event::ModuleStart,
            Event::Header(1),
            Event::SectionStart(SectionKind::Type, None),
            Event::Count("type", 1),
            Event::Type(
                0,
                FunctionType {
                    params: vec![ValueType::I32],
                    result: None,
                }
            ),
            Event::SectionEnd(SectionKind::Type),
            Event::SectionStart(SectionKind::Import, None),
            Event::Count("import", 1),
            Event::Import(
                0,
                ImportEntry {
                    module: "env".to_owned(),
                    field: "g".to_owned(),
                    kind: ImportKind::Global(GlobalType {
                        content_type: ValueType::I32,
                        mutable: false,
                    }),
                }
            ),
            Event::SectionEnd(SectionKind::Import),
            Event::SectionStart(SectionKind::Function, None),
            Event::Count("function", 1),
            Event::Function(0, TypeIdx(0)),
            Event::SectionEnd(SectionKind::Function),
            Event::SectionStart(SectionKind::Table, None),
            Event::Count("table", 1),
            Event::Table(
                0,
                TableType {
                    element_type: ValueType::AnyFunc,
                    limits: ResizableLimits {
                        initial: 1,
                        maximum: None,
                    },
                }
            ),
            Event::SectionEnd(SectionKind::Table),
            Event::SectionStart(SectionKind::Memory, None),
            Event::Count("memory", 1),
            Event::Memory(
                0,
                MemoryType {
                    limits: ResizableLimits {
                        initial: 1,
                        maximum: Some(2),
                    },
                }
            ),
            Event::SectionEnd(SectionKind::Memory),
            Event::SectionStart(SectionKind::Global, None),
            Event::Count("global", 1),
            Event::Global(
                0,
                GlobalEntry {
                    ty: GlobalType {
                        content_type: ValueType::I64,
                        mutable: true,
                    },
                    init: ConstExpr::I64Const(-1),
                }
            ),
            Event::SectionEnd(SectionKind::Global),
            Event::SectionStart(SectionKind::Start, None),
            Event::Start(FuncIdx(0)),
            Event::SectionEnd(SectionKind::Start),
            Event::SectionStart(SectionKind::Element, None),
            Event::Count("element", 1),
            Event::ElementEntry(0, 2),
            Event::Element(0, FuncIdx(0)),
            Event::Element(1, FuncIdx(0)),
            Event::ElementEntryEnd(0),
            Event::SectionEnd(SectionKind::Element),
            Event::SectionStart(SectionKind::Code, None),
            Event::Count("code", 1),
            Event::Body(
                0,
                vec![LocalEntry {
                    count: 1,
                    value_type: ValueType::I64,
                }],
                vec![0x01, 0x0B]
            ),
            Event::BodyEnd(0),
            Event::SectionEnd(SectionKind::Code),
            Event::SectionStart(SectionKind::Data, None),
            Event::Count("data", 1),
            Event::Data(0, MemIdx(0), b"hi".to_vec()),
            Event::SectionEnd(SectionKind::Data),
            Event::ModuleEnd,
        ]
    );
}

#[test]
fn it_builds_an_owned_module() {
    // (func (param i32) (result i32) local.get 0 i32.const 1 i32.add) (export "inc" (func 0))
    let bytes = module(&[
        &[0x01, 0x06, 0x01, 0x60, 0x01, 0x7F, 0x01, 0x7F],
        &[0x03, 0x02, 0x01, 0x00],
        &[0x07, 0x07, 0x01, 0x03, b'i', b'n', b'c', 0x00, 0x00],
        &[0x0A, 0x09, 0x01, 0x07, 0x00, 0x20, 0x00, 0x41, 0x01, 0x6A, 0x0B],
    ]);

    let m = decode_module(&bytes).unwrap();

    assert_eq!(m.version, 1);
    assert_eq!(
        m.sections.iter().map(|s| s.kind).collect::<Vec<_>>(),
        vec![
            SectionKind::Type,
            SectionKind::Function,
            SectionKind::Export,
            SectionKind::Code
        ]
    );
    assert_eq!(m.functions, vec![TypeIdx(0)]);
    assert_eq!(
        m.function_type(FuncIdx(0)),
        Some(&FunctionType {
            params: vec![ValueType::I32],
            result: Some(ValueType::I32),
        })
    );
    assert_eq!(
        m.code,
        vec![Function {
            locals: vec![],
            body: vec![
                Instruction {
                    opcode: Opcode::LocalGet,
                    immediate: Immediate::Index(0),
                },
                Instruction {
                    opcode: Opcode::I32Const,
                    immediate: Immediate::I32(1),
                },
                Instruction::simple(Opcode::I32Add),
                Instruction::simple(Opcode::End),
            ],
        }]
    );
}

#[test]
fn it_collects_elements_and_data_in_the_builder() {
    let bytes = module(&[
        &[0x09, 0x08, 0x01, 0x00, 0x41, 0x02, 0x0B, 0x02, 0x05, 0x06],
        &[0x0B, 0x07, 0x01, 0x00, 0x41, 0x00, 0x0B, 0x01, 0xAB],
    ]);

    let m = decode_module(&bytes).unwrap();
    assert_eq!(
        m.elements,
        vec![Element {
            table_index: TableIdx(0),
            offset: i32_const(2),
            functions: vec![FuncIdx(5), FuncIdx(6)],
        }]
    );
    assert_eq!(
        m.data,
        vec![Data {
            memory_index: MemIdx(0),
            offset: i32_const(0),
            bytes: vec![0xAB],
        }]
    );
}

#[test]
fn it_keeps_custom_sections_in_the_builder() {
    let bytes = module(&[&[0x00, 0x06, 0x03, b'f', b'o', b'o', 0xCA, 0xFE]]);
    let m = decode_module(&bytes).unwrap();
    assert_eq!(
        m.custom_sections,
        vec![CustomSection {
            name: "foo".to_owned(),
            data: vec![0xCA, 0xFE],
        }]
    );
    assert_eq!(m.sections[0].name.as_deref(), Some("foo"));
}

#[test]
fn it_computes_section_sizes_alongside_another_visitor() {
    let bytes = module(&[
        &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00],
        &[0x00, 0x03, 0x02, b'h', b'i'],
    ]);
    let mut recorder = Recorder::default();
    let mut sizes = SectionSizes::new();
    decode(&bytes, &mut Tee::new(&mut recorder, &mut sizes)).unwrap();

    assert_eq!(sizes.module_size, bytes.len());
    assert_eq!(
        sizes
            .sections
            .iter()
            .map(|s| (s.kind, s.offset, s.length))
            .collect::<Vec<_>>(),
        vec![(SectionKind::Type, 10, 4), (SectionKind::Custom, 16, 3)]
    );
    assert_eq!(sizes.total(SectionKind::Type), 4);
    assert_eq!(recorder.events.last(), Some(&Event::ModuleEnd));
}

#[test]
fn it_lets_function_bodies_be_decoded_lazily() {
    // two bodies: `end` and `i32.const 7 drop end`
    let bytes = module(&[&[
        0x0A, 0x0A, 0x02, 0x02, 0x00, 0x0B, 0x05, 0x00, 0x41, 0x07, 0x1A, 0x0B,
    ]]);

    #[derive(Default)]
    struct Counter(Vec<usize>);
    impl Visitor for Counter {
        fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
            let n = body.instructions().collect::<Result<Vec<_>, _>>()?.len();
            self.0.push(n);
            Ok(())
        }
    }

    let mut counter = Counter::default();
    decode(&bytes, &mut counter).unwrap();
    // the final `end` is included in each count
    assert_eq!(counter.0, vec![1, 3]);
}

#[test]
fn no_op_visitor_accepts_every_event() {
    let bytes = module(&[&[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]]);
    assert_eq!(decode(&bytes, &mut NoOpVisitor), Ok(()));
}

#[test]
fn it_hands_back_owned_visitors_from_a_tee() {
    let bytes = module(&[&[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]]);
    let mut tee = Tee::new(Recorder::default(), SectionSizes::new());
    decode(&bytes, &mut tee).unwrap();

    let (recorder, sizes) = tee.into_inner();
    assert_eq!(recorder.events.first(), Some(&Event::ModuleStart));
    assert_eq!(sizes.sections.len(), 1);
}

#[test]
fn it_tracks_locals_and_nesting_of_a_body() {
    // locals (2 x i32, 1 x i64), then `block if nop end end end`
    let bytes = module(&[&[
        0x0A, 0x0F, 0x01, 0x0D, 0x02, 0x02, 0x7F, 0x01, 0x7E, 0x02, 0x40, 0x04, 0x40, 0x01, 0x0B,
        0x0B, 0x0B,
    ]]);

    #[derive(Default)]
    struct Shape {
        locals: u64,
        max_depth: usize,
    }
    impl Visitor for Shape {
        fn function_body(&mut self, body: &FunctionBody<'_>) -> Result<(), DecodeError> {
            self.locals = body.local_count();
            let mut instructions = body.instructions();
            while let Some(instr) = instructions.next() {
                instr?;
                self.max_depth = self.max_depth.max(instructions.depth());
            }
            assert_eq!(instructions.depth(), 0);
            Ok(())
        }
    }

    let mut shape = Shape::default();
    decode(&bytes, &mut shape).unwrap();
    assert_eq!(shape.locals, 3);
    assert_eq!(shape.max_depth, 2);
}
