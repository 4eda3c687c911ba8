//! Token stream to rows of cells

use super::cell::{parse_rowspan, Cell, CellKind, Inline, InlineTag, Row};
use super::tokenizer::{tokenize, Token};
use crate::utils::error::{ConversionError, ConversionResult};

/// Which section new rows land in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
}

/// A table split into its header and body sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Rows inside `<thead>`
    pub head: Vec<Row>,
    /// Every other row
    pub body: Vec<Row>,
}

/// Builder threaded through the token stream
///
/// HTML lets `</td>` and `</tr>` be omitted, so opening a cell closes the
/// open one and opening a row closes the open row.
struct TableBuilder {
    table: ParsedTable,
    section: Section,
    row: Option<Row>,
    cell: Option<Cell>,
    seen_table: bool,
}

impl TableBuilder {
    fn new() -> Self {
        TableBuilder {
            table: ParsedTable::default(),
            section: Section::Body,
            row: None,
            cell: None,
            seen_table: false,
        }
    }

    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(Row::new).push(cell);
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take() {
            if row.is_empty() {
                return;
            }
            match self.section {
                Section::Head => self.table.head.push(row),
                Section::Body => self.table.body.push(row),
            }
        }
    }

    fn open(&mut self, token: &Token<'_>) -> ConversionResult<()> {
        let Token::Open {
            name, self_closing, ..
        } = token
        else {
            return Ok(());
        };

        match name.as_str() {
            "table" => {
                if self.seen_table {
                    return Err(ConversionError::parse("nested <table> is not supported"));
                }
                self.seen_table = true;
            }
            "thead" => {
                self.finish_row();
                self.section = Section::Head;
            }
            "tbody" | "tfoot" => {
                self.finish_row();
                self.section = Section::Body;
            }
            "tr" => {
                self.finish_row();
                self.row = Some(Row::new());
            }
            "td" | "th" => {
                self.finish_cell();
                let kind = if name == "th" {
                    CellKind::Header
                } else {
                    CellKind::Data
                };
                let cell = Cell::new(kind, parse_rowspan(token.attr("rowspan")));
                if *self_closing {
                    self.row.get_or_insert_with(Row::new).push(cell);
                } else {
                    self.cell = Some(cell);
                }
            }
            "br" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.content.push(Inline::LineBreak);
                }
            }
            other => {
                if let (Some(cell), Some(tag)) = (self.cell.as_mut(), InlineTag::from_tag(other)) {
                    cell.content.push(Inline::Open(tag));
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &str) {
        match name {
            "td" | "th" => self.finish_cell(),
            "tr" | "table" => self.finish_row(),
            "thead" | "tbody" | "tfoot" => {
                self.finish_row();
                self.section = Section::Body;
            }
            // `</br>` is how some converters spell a line break
            "br" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.content.push(Inline::LineBreak);
                }
            }
            other => {
                if let (Some(cell), Some(tag)) = (self.cell.as_mut(), InlineTag::from_tag(other)) {
                    cell.content.push(Inline::Close(tag));
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_text(text);
        }
    }

    fn finish(mut self) -> ParsedTable {
        self.finish_row();
        self.table
    }
}

/// Parse one table span into header and body rows
pub fn parse_table(markup: &str) -> ConversionResult<ParsedTable> {
    let tokens = tokenize(markup)?;
    let mut builder = TableBuilder::new();
    for token in &tokens {
        match token {
            Token::Open { .. } => builder.open(token)?,
            Token::Close { name } => builder.close(name),
            Token::Text(text) => builder.text(text),
        }
    }
    Ok(builder.finish())
}
