//! Lazy scanner for `<table …>…</table>` spans embedded in Markdown

/// One raw HTML table inside a document, tags included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpan<'a> {
    /// Byte offset of the `<` of the opening tag
    pub start: usize,
    /// Byte offset one past the `>` of the closing tag
    pub end: usize,
    /// The markup between `start` and `end`
    pub markup: &'a str,
}

/// Iterator over the table spans of a document, in document order
///
/// Spans never overlap. A table ends at the first `</table>` after its
/// opening tag, so nested tables are not supported.
pub struct TableSpans<'a> {
    text: &'a str,
    pos: usize,
}

/// Scan `text` for HTML tables
pub fn table_spans(text: &str) -> TableSpans<'_> {
    TableSpans { text, pos: 0 }
}

impl<'a> Iterator for TableSpans<'a> {
    type Item = TableSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = match find_open_tag(self.text, self.pos) {
            Some(start) => start,
            None => {
                self.pos = self.text.len();
                return None;
            }
        };

        match find_close_tag(self.text, start + "<table".len()) {
            Some(end) => {
                self.pos = end;
                Some(TableSpan {
                    start,
                    end,
                    markup: &self.text[start..end],
                })
            }
            None => {
                // Unclosed table: nothing after it can be a complete span
                self.pos = self.text.len();
                None
            }
        }
    }
}

/// ASCII case-insensitive substring search starting at `from`
fn find_ci(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if from >= hay.len() || needle.len() > hay.len() - from {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| p + from)
}

fn find_open_tag(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;
    while let Some(found) = find_ci(text, pos, "<table") {
        let after = found + "<table".len();
        match bytes.get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(found),
            // `<tablex`, `<table` at end of input
            _ => pos = after,
        }
    }
    None
}

fn find_close_tag(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;
    while let Some(found) = find_ci(text, pos, "</table") {
        let mut i = found + "</table".len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'>') {
            return Some(i + 1);
        }
        pos = found + "</table".len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_spans_in_order() {
        let text = "intro\n<table><tr><td>1</td></tr></table>\nmid\n<TABLE class=\"x\">\n<tr><td>2</td></tr>\n</Table >\nend";
        let spans: Vec<_> = table_spans(text).collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].markup, "<table><tr><td>1</td></tr></table>");
        assert!(spans[1].markup.starts_with("<TABLE class"));
        assert!(spans[1].markup.ends_with("</Table >"));
        assert_eq!(&text[spans[1].start..spans[1].end], spans[1].markup);
    }

    #[test]
    fn test_rejects_lookalike_tags() {
        let text = "<tablex>no</tablex> <table>yes</table>";
        let spans: Vec<_> = table_spans(text).collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].markup, "<table>yes</table>");
    }

    #[test]
    fn test_unclosed_table_ends_scan() {
        let text = "<table><tr><td>1</td></tr></table> <table><tr>";
        assert_eq!(table_spans(text).count(), 1);
    }

    #[test]
    fn test_nested_table_ends_at_first_close() {
        let text = "<table><tr><td><table><tr><td>in</td></tr></table></td></tr></table>";
        let span = table_spans(text).next().unwrap();
        assert!(span.markup.ends_with("<td>in</td></tr></table>"));
    }

    #[test]
    fn test_multibyte_text_around_tables() {
        let text = "über <table><tr><td>é</td></tr></table> café";
        let span = table_spans(text).next().unwrap();
        assert_eq!(span.markup, "<table><tr><td>é</td></tr></table>");
    }
}
