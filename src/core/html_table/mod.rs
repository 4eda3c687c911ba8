//! HTML table to pipe table conversion
//!
//! Converts raw HTML tables embedded in Markdown into Markdown pipe tables,
//! resolving `rowspan` along the way.
//!
//! # Architecture
//!
//! ```text
//! Markdown -> table_spans -> tokenize -> parse_table -> flatten -> render_pipe_table
//! ```
//!
//! Every stage is a pure function. A table that cannot be tokenized, uses a
//! shape the selected rowspan strategy does not handle, or has no header row
//! is left exactly as it was; one bad table never fails the whole document.
//!
//! # Example
//!
//! ```rust
//! use mdfix::html_table::{convert_html_tables_str, TableOptions};
//!
//! let md = "<table><thead><tr><th>A</th></tr></thead><tbody><tr><td>1</td></tr></tbody></table>";
//! assert_eq!(
//!     convert_html_tables_str(md, &TableOptions::default()),
//!     "| A |\n|---|\n| 1 |"
//! );
//! ```

mod cell;
mod emit;
mod flatten;
mod locator;
mod parser;
mod tokenizer;

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::utils::error::{ConversionOutput, ConversionResult, ConversionWarning};

// Re-export public API
pub use cell::{parse_rowspan, Cell, CellKind, Inline, InlineTag, Row, MAX_ROWSPAN};
pub use emit::{collapse_whitespace, render_inlines, render_pipe_table};
pub use flatten::{flatten_parsed, flatten_table, FlatTable};
pub use locator::{table_spans, TableSpan, TableSpans};
pub use parser::{parse_table, ParsedTable};
pub use tokenizer::{tokenize, Token, Tokenizer};

/// How cells with `rowspan > 1` are flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowspanMode {
    /// Repeat the spanning cell in every row it covers
    #[default]
    Duplicate,
    /// Fold the covered rows into one, joining their values with a line break
    Merge,
}

/// How `<br>` inside a cell is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreak {
    /// Inline `<br>`
    #[default]
    Html,
    /// ` / `
    Slash,
}

impl LineBreak {
    pub fn separator(&self) -> &'static str {
        match self {
            LineBreak::Html => "<br>",
            LineBreak::Slash => " / ",
        }
    }
}

/// Options for table conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    pub rowspan: RowspanMode,
    pub line_break: LineBreak,
}

impl TableOptions {
    /// Duplicate spanning cells into every covered row
    pub fn duplicate() -> Self {
        Self::default()
    }

    /// Merge manufacturer-style spans into a single row
    pub fn merge() -> Self {
        TableOptions {
            rowspan: RowspanMode::Merge,
            ..Default::default()
        }
    }
}

/// Convert one table span
///
/// `Ok(None)` means the table has no header row and should stay HTML.
pub fn convert_table_span(markup: &str, options: &TableOptions) -> ConversionResult<Option<String>> {
    let flat = flatten_table(markup, options)?;
    Ok(render_pipe_table(&flat.header, &flat.body))
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// Convert every HTML table in a Markdown document
pub fn convert_html_tables(text: &str, options: &TableOptions) -> ConversionOutput {
    let mut content = String::with_capacity(text.len());
    let mut warnings = Vec::new();
    let mut last = 0;

    for span in table_spans(text) {
        content.push_str(&text[last..span.start]);
        last = span.end;

        match convert_table_span(span.markup, options) {
            Ok(Some(pipe)) => {
                debug!("converted table at line {}", line_of(text, span.start));
                content.push_str(&pipe);
            }
            Ok(None) => {
                debug!(
                    "table at line {} has no header row, left as HTML",
                    line_of(text, span.start)
                );
                content.push_str(span.markup);
            }
            Err(e) => {
                let line = line_of(text, span.start);
                warn!("table at line {} left unchanged: {}", line, e);
                warnings.push(ConversionWarning {
                    message: format!("table left unchanged: {}", e),
                    line: Some(line),
                    suggestion: None,
                });
                content.push_str(span.markup);
            }
        }
    }

    content.push_str(&text[last..]);
    ConversionOutput::with_warnings(content, warnings)
}

/// Convert every HTML table, discarding warnings
pub fn convert_html_tables_str(text: &str, options: &TableOptions) -> String {
    convert_html_tables(text, options).content
}
