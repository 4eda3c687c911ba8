//! Core conversion modules
//!
//! - `html_table`: HTML tables to Markdown pipe tables, with rowspan flattening

pub mod html_table;

pub use html_table::{
    convert_html_tables, convert_html_tables_str, LineBreak, RowspanMode, TableOptions,
};
