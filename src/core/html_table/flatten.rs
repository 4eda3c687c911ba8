//! Rowspan flattening
//!
//! Resolves `rowspan` into a rectangular grid. Header and body sections are
//! flattened independently and never share spans.
//!
//! Two strategies, selected by [`RowspanMode`]:
//!
//! ```text
//! Duplicate:  | Acme | A1 |        Merge:  | Acme | A1<br>A2 |
//!             | Acme | A2 |
//! ```

use tracing::debug;

use super::cell::Row;
use super::emit::render_inlines;
use super::parser::{parse_table, ParsedTable};
use super::{RowspanMode, TableOptions};
use crate::utils::error::{ConversionError, ConversionResult};

/// Flattened table, ready for emission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    /// First header row; empty when the table has no `<thead>` rows
    pub header: Vec<String>,
    /// Remaining header rows followed by the body rows
    pub body: Vec<Vec<String>>,
}

/// Grid under construction; `None` marks a slot no cell has claimed yet
#[derive(Debug, Default)]
struct GridBuilder {
    rows: Vec<Vec<Option<String>>>,
}

impl GridBuilder {
    fn ensure_row(&mut self, row: usize) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
    }

    /// First column of `row` not held by a cell spanning down from above
    fn first_free_col(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .and_then(|cells| cells.iter().position(Option::is_none))
            .or_else(|| self.rows.get(row).map(Vec::len))
            .unwrap_or(0)
    }

    /// Write `text` at `col` for `span` rows starting at `row`
    fn place(&mut self, row: usize, col: usize, span: usize, text: &str) {
        for r in row..row + span {
            self.ensure_row(r);
            let cells = &mut self.rows[r];
            if cells.len() <= col {
                cells.resize(col + 1, None);
            }
            // Overlapping spans only occur in broken tables; first writer wins
            if cells[col].is_none() {
                cells[col] = Some(text.to_string());
            }
        }
    }

    fn finish(self) -> Vec<Vec<String>> {
        self.rows
            .into_iter()
            .map(|cells| cells.into_iter().map(Option::unwrap_or_default).collect())
            .collect()
    }
}

fn duplicate_section(rows: &[Row], options: &TableOptions) -> Vec<Vec<String>> {
    let mut grid = GridBuilder::default();
    for (r, row) in rows.iter().enumerate() {
        grid.ensure_row(r);
        for cell in &row.cells {
            let col = grid.first_free_col(r);
            let text = render_inlines(&cell.content, options.line_break);
            grid.place(r, col, cell.rowspan, &text);
        }
    }
    grid.finish()
}

fn merge_section(rows: &[Row], options: &TableOptions) -> ConversionResult<Vec<Vec<String>>> {
    let render = |cell: &super::cell::Cell| render_inlines(&cell.content, options.line_break);
    let mut out = Vec::new();
    let mut i = 0;

    while i < rows.len() {
        let row = &rows[i];
        if let Some(col) = row.cells.iter().skip(1).position(|c| c.is_spanning()) {
            return Err(ConversionError::unsupported_shape(format!(
                "rowspan in column {} of row {}; merge only handles a spanning first column",
                col + 2,
                i + 1
            )));
        }

        let span = row.cells.first().map_or(1, |c| c.rowspan);
        if span <= 1 {
            out.push(row.cells.iter().map(render).collect());
            i += 1;
            continue;
        }

        if row.cells.len() != 2 {
            return Err(ConversionError::unsupported_shape(format!(
                "row {} has {} cells; merge expects the spanning cell plus one value",
                i + 1,
                row.cells.len()
            )));
        }

        let end = (i + span).min(rows.len());
        let mut values = vec![render(&row.cells[1])];
        for (offset, spanned) in rows[i + 1..end].iter().enumerate() {
            if spanned.cells.len() != 1 || spanned.cells[0].is_spanning() {
                return Err(ConversionError::unsupported_shape(format!(
                    "row {} under a merged span has {} cells; expected one",
                    i + 2 + offset,
                    spanned.cells.len()
                )));
            }
            values.push(render(&spanned.cells[0]));
        }

        debug!("merged {} rows under '{}'", end - i, render(&row.cells[0]));
        out.push(vec![
            render(&row.cells[0]),
            values.join(options.line_break.separator()),
        ]);
        i = end;
    }

    Ok(out)
}

fn flatten_section(rows: &[Row], options: &TableOptions) -> ConversionResult<Vec<Vec<String>>> {
    match options.rowspan {
        RowspanMode::Duplicate => Ok(duplicate_section(rows, options)),
        RowspanMode::Merge => merge_section(rows, options),
    }
}

fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    if row.len() < width {
        row.resize(width, String::new());
    }
    row
}

/// Flatten an already parsed table
pub fn flatten_parsed(table: &ParsedTable, options: &TableOptions) -> ConversionResult<FlatTable> {
    let head = flatten_section(&table.head, options)?;
    let body = flatten_section(&table.body, options)?;

    let mut head_rows = head.into_iter();
    let header = head_rows.next().unwrap_or_default();
    let width = header.len();
    let body = head_rows
        .chain(body)
        .map(|row| pad_row(row, width))
        .collect();

    Ok(FlatTable { header, body })
}

/// Parse and flatten one table span
pub fn flatten_table(markup: &str, options: &TableOptions) -> ConversionResult<FlatTable> {
    let table = parse_table(markup)?;
    flatten_parsed(&table, options)
}
