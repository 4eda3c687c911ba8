//! Cell types for HTML table parsing

use std::num::IntErrorKind;

/// Whether a cell came from `<th>` or `<td>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Data,
}

/// Inline markup kept inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    /// `<u>`
    Underline,
    /// `<strong>` or `<b>`
    Bold,
}

impl InlineTag {
    /// Map an HTML tag name onto the allow-list
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "u" => Some(InlineTag::Underline),
            "strong" | "b" => Some(InlineTag::Bold),
            _ => None,
        }
    }

    pub fn open_markup(&self) -> &'static str {
        match self {
            InlineTag::Underline => "<u>",
            InlineTag::Bold => "<strong>",
        }
    }

    pub fn close_markup(&self) -> &'static str {
        match self {
            InlineTag::Underline => "</u>",
            InlineTag::Bold => "</strong>",
        }
    }
}

/// One piece of cell content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    LineBreak,
    Open(InlineTag),
    Close(InlineTag),
}

/// A single `<td>`/`<th>` cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    /// Number of rows this cell spans (at least 1)
    pub rowspan: usize,
    pub content: Vec<Inline>,
}

impl Cell {
    pub fn new(kind: CellKind, rowspan: usize) -> Self {
        Cell {
            kind,
            rowspan: rowspan.max(1),
            content: Vec::new(),
        }
    }

    /// Cell holding plain text
    pub fn text(kind: CellKind, text: &str) -> Self {
        let mut cell = Cell::new(kind, 1);
        cell.push_text(text);
        cell
    }

    /// Append character data, merging with a preceding text run
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.content.last_mut() {
            Some(Inline::Text(existing)) => existing.push_str(text),
            _ => self.content.push(Inline::Text(text.to_string())),
        }
    }

    pub fn is_spanning(&self) -> bool {
        self.rowspan > 1
    }
}

/// Largest rowspan honoured; browsers clamp to the same value
pub const MAX_ROWSPAN: usize = 65534;

/// Parse a `rowspan` attribute value; anything unusable counts as 1
///
/// Values above [`MAX_ROWSPAN`], including ones too large for `usize`, are
/// clamped to it.
pub fn parse_rowspan(value: Option<&str>) -> usize {
    let Some(value) = value else {
        return 1;
    };
    match value.trim().parse::<usize>() {
        Ok(n) => n.clamp(1, MAX_ROWSPAN),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_ROWSPAN,
        Err(_) => 1,
    }
}

/// A table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
