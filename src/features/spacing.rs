//! Blank-line repairs
//!
//! - `fix_table_spacing`: a pipe table glued to the preceding paragraph, list
//!   item or admonition is not parsed as a table; insert the missing blank line.
//! - `reduce_spacing`: collapse runs of blank lines to a single one.

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A line that can be a pipe-table row: starts with `|` and has another `|`
fn is_table_row(line: &str) -> bool {
    line.trim()
        .strip_prefix('|')
        .is_some_and(|rest| rest.contains('|'))
}

/// Insert a blank line before a pipe table that directly follows content
pub fn fix_table_spacing(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len());

    for (i, &line) in lines.iter().enumerate() {
        result.push(line);

        let Some(&next) = lines.get(i + 1) else {
            continue;
        };
        let current = line.trim();
        let table_starts = is_table_row(next) && !current.starts_with('|');
        if table_starts && !current.is_empty() && !current.starts_with('#') {
            result.push("");
        }
    }

    result.join("\n")
}

/// Collapse consecutive blank lines into one
///
/// Whitespace-only lines count as blank. A kept blank line keeps its
/// original text.
pub fn reduce_spacing(content: &str) -> String {
    let mut result: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in content.split('\n') {
        let blank = is_blank(line);
        if blank && prev_blank {
            continue;
        }
        result.push(line);
        prev_blank = blank;
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_line_added_after_list_item() {
        let input = "1. Check the zones:\n| Zone | Type |\n|---|---|\n| 1 | Door |";
        let expected = "1. Check the zones:\n\n| Zone | Type |\n|---|---|\n| 1 | Door |";
        assert_eq!(fix_table_spacing(input), expected);
    }

    #[test]
    fn test_headings_and_existing_blank_lines_untouched() {
        let input = "## Zones\n| Zone | Type |\n|---|---|\n\nText\n\n| A | B |\n|---|---|";
        assert_eq!(fix_table_spacing(input), input);
    }

    #[test]
    fn test_single_pipe_is_not_a_table() {
        let input = "Text\n| not a table";
        assert_eq!(fix_table_spacing(input), input);
    }

    #[test]
    fn test_three_blank_lines_become_one() {
        let input = "First paragraph.\n\n\n\nSecond paragraph.\n\nThird paragraph.";
        let expected = "First paragraph.\n\nSecond paragraph.\n\nThird paragraph.";
        assert_eq!(reduce_spacing(input), expected);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        assert_eq!(reduce_spacing("a\n  \n\t\n\nb"), "a\n  \nb");
    }

    #[test]
    fn test_trailing_newline_kept() {
        assert_eq!(reduce_spacing("a\n\n\n"), "a\n");
    }
}
