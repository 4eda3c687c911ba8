//! # mdfix
//!
//! Repair filters for Markdown produced by document converters.
//!
//! ## Features
//!
//! - **HTML tables**: embedded `<table>` markup becomes pipe tables, with
//!   `rowspan` duplicated or merged
//! - **Table structure**: headings in cells, empty rows and split header rows
//!   are repaired before conversion
//! - **Admonitions**: callouts and blockquoted admonitions become indented
//!   `!!!` blocks
//! - **Layout**: list numbering, image paths, blank lines around tables
//!
//! Every filter is a pure `&str -> String` function. The [`utils::driver`]
//! module applies one of them to a file in place.
//!
//! ## Usage Examples
//!
//! ### Table Conversion
//!
//! ```rust
//! use mdfix::{convert_html_tables_str, TableOptions};
//!
//! let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
//!             <tbody><tr><td rowspan=\"2\">X</td><td>1</td></tr>\
//!             <tr><td>2</td></tr></tbody></table>";
//! let md = convert_html_tables_str(html, &TableOptions::duplicate());
//! assert_eq!(md, "| A | B |\n|---|---|\n| X | 1 |\n| X | 2 |");
//! ```
//!
//! ### Text Filters
//!
//! ```rust
//! use mdfix::{normalize_callouts, reduce_spacing};
//!
//! assert_eq!(reduce_spacing("one\n\n\n\ntwo"), "one\n\ntwo");
//! assert_eq!(
//!     normalize_callouts("> [!TIP] Hint\n> body\n"),
//!     "!!! tip \"Hint\"\n    body\n"
//! );
//! ```

/// Core conversion modules
pub mod core;

/// Markdown repair filters
pub mod features;

/// Utility modules
pub mod utils;

// Re-export the table converter
pub use crate::core::html_table;
pub use crate::core::html_table::{
    convert_html_tables, convert_html_tables_str, LineBreak, RowspanMode, TableOptions,
};

// Re-export the filters
pub use features::{
    fix_admonitions, fix_list_continuity, fix_relative_images, fix_table_spacing,
    fix_table_structure, fix_vista48_table, normalize_callouts, reduce_spacing,
};

// Re-export utilities
pub use utils::driver::{process_file, FileOutcome, Filter, FilterOptions, WritePolicy};
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Run a filter over an in-memory document
pub fn apply_filter(filter: Filter, content: &str, options: &FilterOptions) -> ConversionOutput {
    filter.apply(content, options)
}
