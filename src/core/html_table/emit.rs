//! Cell text normalization and Markdown pipe-table emission

use std::fmt::Write;

use super::cell::Inline;
use super::LineBreak;

/// Collapse whitespace runs to one space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape characters that would break a pipe-table row
fn escape_cell_text(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Render cell content to a single line of pipe-table text
///
/// Text around each line break is trimmed separately, and breaks at the very
/// start or end of the cell are dropped.
pub fn render_inlines(content: &[Inline], line_break: LineBreak) -> String {
    let mut segments: Vec<String> = vec![String::new()];
    for inline in content {
        match inline {
            Inline::Text(text) => {
                if let Some(seg) = segments.last_mut() {
                    seg.push_str(&escape_cell_text(text));
                }
            }
            Inline::Open(tag) => {
                if let Some(seg) = segments.last_mut() {
                    seg.push_str(tag.open_markup());
                }
            }
            Inline::Close(tag) => {
                if let Some(seg) = segments.last_mut() {
                    seg.push_str(tag.close_markup());
                }
            }
            Inline::LineBreak => segments.push(String::new()),
        }
    }

    let mut segments: Vec<String> = segments.iter().map(|s| collapse_whitespace(s)).collect();
    while segments.first().is_some_and(|s| s.is_empty()) {
        segments.remove(0);
    }
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments.join(line_break.separator())
}

/// Serialize a header and body into a Markdown pipe table
///
/// Body rows are padded or truncated to the header's column count. Returns
/// `None` for an empty header, meaning "leave the source table alone".
pub fn render_pipe_table(header: &[String], body: &[Vec<String>]) -> Option<String> {
    if header.is_empty() {
        return None;
    }
    let width = header.len();
    let mut output = String::new();

    let _ = writeln!(output, "| {} |", header.join(" | "));

    let dashes: Vec<String> = header
        .iter()
        .map(|h| "-".repeat(h.chars().count() + 2))
        .collect();
    let _ = write!(output, "|{}|", dashes.join("|"));

    for row in body {
        let mut cells: Vec<&str> = row.iter().take(width).map(String::as_str).collect();
        cells.resize(width, "");
        let _ = write!(output, "\n| {} |", cells.join(" | "));
    }

    Some(output)
}

#[cfg(test)]
mod tests {
    use super::super::cell::InlineTag;
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_render_basic_table() {
        let out = render_pipe_table(&s(&["A", "B"]), &[s(&["X", "1"]), s(&["X", "2"])]).unwrap();
        assert_eq!(out, "| A | B |\n|---|---|\n| X | 1 |\n| X | 2 |");
    }

    #[test]
    fn test_separator_width_follows_label() {
        let out = render_pipe_table(&s(&["Model", "é"]), &[]).unwrap();
        assert_eq!(out, "| Model | é |\n|-------|---|");
    }

    #[test]
    fn test_rows_padded_and_truncated() {
        let out =
            render_pipe_table(&s(&["A", "B"]), &[s(&["1"]), s(&["1", "2", "3"])]).unwrap();
        assert_eq!(out, "| A | B |\n|---|---|\n| 1 |  |\n| 1 | 2 |");
    }

    #[test]
    fn test_empty_header_is_sentinel() {
        assert!(render_pipe_table(&[], &[s(&["1"])]).is_none());
    }

    #[test]
    fn test_render_inlines_collapses_whitespace() {
        let content = vec![Inline::Text("  Network \n\t connectivity ".into())];
        assert_eq!(render_inlines(&content, LineBreak::Html), "Network connectivity");
    }

    #[test]
    fn test_render_inlines_line_breaks() {
        let content = vec![
            Inline::LineBreak,
            Inline::Text("LTE ".into()),
            Inline::LineBreak,
            Inline::Text(" Ethernet".into()),
            Inline::LineBreak,
        ];
        assert_eq!(render_inlines(&content, LineBreak::Html), "LTE<br>Ethernet");
        assert_eq!(render_inlines(&content, LineBreak::Slash), "LTE / Ethernet");
    }

    #[test]
    fn test_render_inlines_keeps_markup_and_escapes_pipes() {
        let content = vec![
            Inline::Open(InlineTag::Bold),
            Inline::Text("a|b".into()),
            Inline::Close(InlineTag::Bold),
            Inline::Text(" and ".into()),
            Inline::Open(InlineTag::Underline),
            Inline::Text("c".into()),
            Inline::Close(InlineTag::Underline),
        ];
        assert_eq!(
            render_inlines(&content, LineBreak::Html),
            "<strong>a\\|b</strong> and <u>c</u>"
        );
    }
}
