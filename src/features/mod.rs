//! Markdown repair filters
//!
//! Each module holds one pure `&str -> String` pass:
//! - `lists`: list numbering broken by images
//! - `images`: relative image paths
//! - `spacing`: blank lines before tables, blank-line runs
//! - `vista48`: the Vista 48 special-settings table
//! - `admonitions`: inline and blockquoted admonition bodies
//! - `table_structure`: malformed HTML table markup
//! - `callouts`: GitHub callouts to admonitions

pub mod admonitions;
pub mod callouts;
pub mod images;
pub mod lists;
pub mod spacing;
pub mod table_structure;
pub mod vista48;

// Re-export the filter entry points
pub use admonitions::fix_admonitions;
pub use callouts::normalize_callouts;
pub use images::fix_relative_images;
pub use lists::fix_list_continuity;
pub use spacing::{fix_table_spacing, reduce_spacing};
pub use table_structure::fix_table_structure;
pub use vista48::fix_vista48_table;
