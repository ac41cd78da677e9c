//! One decoder per section body. Each reads its element count, reports it, and then forwards
//! every record to the visitor as soon as it is decoded.
pub(crate) mod code;
pub(crate) mod custom;
pub(crate) mod data;
pub(crate) mod element;
pub(crate) mod export;
pub(crate) mod function;
pub(crate) mod global;
pub(crate) mod import;
pub(crate) mod memory;
pub(crate) mod start;
pub(crate) mod table;
pub(crate) mod r#type;

pub(crate) use code::decode_code_section;
pub(crate) use custom::decode_custom_section;
pub(crate) use data::decode_data_section;
pub(crate) use element::decode_element_section;
pub(crate) use export::decode_export_section;
pub(crate) use function::decode_function_section;
pub(crate) use global::decode_global_section;
pub(crate) use import::decode_import_section;
pub(crate) use memory::decode_memory_section;
pub(crate) use start::decode_start_section;
pub(crate) use table::decode_table_section;
pub(crate) use r#type::decode_type_section;
