//! File driver shared by every filter
//!
//! Reads the whole file, applies one pure transform and writes the result
//! back to the same path. The file is only touched after the transform has
//! finished, so a failed run leaves it as it was.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::html_table::{convert_html_tables, TableOptions};
use crate::features::{
    fix_admonitions, fix_list_continuity, fix_relative_images, fix_table_spacing,
    fix_table_structure, fix_vista48_table, normalize_callouts, reduce_spacing,
};
use crate::utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// When the driver writes the transformed text back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Rewrite the file on every run
    Always,
    /// Rewrite only if the transform changed something
    WhenChanged,
}

/// Options passed through the driver to the filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Used by [`Filter::HtmlTables`]
    pub table: TableOptions,
    /// Run the transform and report, but never write
    pub dry_run: bool,
}

/// Result of running one filter over one file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// The transform produced different text
    pub changed: bool,
    /// The file was rewritten
    pub written: bool,
    pub warnings: Vec<ConversionWarning>,
}

/// The Markdown filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    ListContinuity,
    RelativeImages,
    TableSpacing,
    Vista48Table,
    Admonitions,
    TableStructure,
    HtmlTables,
    Callouts,
    ReduceSpacing,
}

impl Filter {
    pub const ALL: [Filter; 9] = [
        Filter::ListContinuity,
        Filter::RelativeImages,
        Filter::TableSpacing,
        Filter::Vista48Table,
        Filter::Admonitions,
        Filter::TableStructure,
        Filter::HtmlTables,
        Filter::Callouts,
        Filter::ReduceSpacing,
    ];

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Filter::ListContinuity => "list-continuity",
            Filter::RelativeImages => "relative-images",
            Filter::TableSpacing => "table-spacing",
            Filter::Vista48Table => "vista48-table",
            Filter::Admonitions => "admonitions",
            Filter::TableStructure => "table-structure",
            Filter::HtmlTables => "html-tables",
            Filter::Callouts => "callouts",
            Filter::ReduceSpacing => "reduce-spacing",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn write_policy(&self) -> WritePolicy {
        match self {
            Filter::ListContinuity | Filter::HtmlTables => WritePolicy::WhenChanged,
            _ => WritePolicy::Always,
        }
    }

    /// Run the transform over a whole document
    pub fn apply(&self, content: &str, options: &FilterOptions) -> ConversionOutput {
        let text = match self {
            Filter::HtmlTables => return convert_html_tables(content, &options.table),
            Filter::ListContinuity => fix_list_continuity(content),
            Filter::RelativeImages => fix_relative_images(content),
            Filter::TableSpacing => fix_table_spacing(content),
            Filter::Vista48Table => fix_vista48_table(content),
            Filter::Admonitions => fix_admonitions(content),
            Filter::TableStructure => fix_table_structure(content),
            Filter::Callouts => normalize_callouts(content),
            Filter::ReduceSpacing => reduce_spacing(content),
        };
        ConversionOutput::new(text)
    }

    fn fixed_message(&self) -> &'static str {
        match self {
            Filter::ListContinuity => "Fixed list continuity in",
            Filter::RelativeImages => "Fixed relative image paths in",
            Filter::TableSpacing => "Fixed table spacing in",
            Filter::Vista48Table => "Fixed Vista 48 table in",
            Filter::Admonitions => "Fixed admonitions in",
            Filter::TableStructure => "Fixed table structure in",
            Filter::HtmlTables => "Converted HTML tables to pipe tables in",
            Filter::Callouts => "Normalized callouts in",
            Filter::ReduceSpacing => "Reduced spacing in",
        }
    }

    fn unchanged_message(&self) -> &'static str {
        match self {
            Filter::HtmlTables => "No HTML tables converted in",
            _ => "No changes needed in",
        }
    }

    /// One-line status for stdout
    pub fn status_message(&self, outcome: &FileOutcome, path: &Path) -> String {
        let message = if outcome.changed {
            self.fixed_message()
        } else {
            self.unchanged_message()
        };
        format!("{} {}", message, path.display())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `filter` to the file at `path`
pub fn process_file(
    path: impl AsRef<Path>,
    filter: Filter,
    options: &FilterOptions,
) -> ConversionResult<FileOutcome> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConversionError::not_found(path));
    }

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => {
            ConversionError::invalid(format!("{} is not valid UTF-8", path.display()))
        }
        _ => ConversionError::io(path, e),
    })?;
    let output = filter.apply(&content, options);
    let changed = output.content != content;

    let written = !options.dry_run
        && match filter.write_policy() {
            WritePolicy::Always => true,
            WritePolicy::WhenChanged => changed,
        };
    if written {
        fs::write(path, &output.content).map_err(|e| ConversionError::io(path, e))?;
    }

    debug!(
        filter = filter.name(),
        path = %path.display(),
        changed,
        written,
        "processed file"
    );

    Ok(FileOutcome {
        changed,
        written,
        warnings: output.warnings,
    })
}
