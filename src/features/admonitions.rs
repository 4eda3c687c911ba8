//! Admonition block repair
//!
//! A well-formed admonition is a `!!! kind "title"` line followed by a body
//! indented four spaces. Converters emit two broken variants:
//!
//! ```text
//! !!! note Check the wiring        !!! warning
//! > more text                      > body text
//! ```
//!
//! Both are rewritten to the indented form, followed by one blank line.
//! Bodies that are already indented are kept, so the pass is stable.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Admonition header with content on the same line
    static ref INLINE_CONTENT: Regex = Regex::new(
        r#"^(!!! (?:note|warning|tip|caution|important)(?: "[^"]*")?)\s+(.+)$"#
    )
    .unwrap();
    /// Admonition header alone on its line
    static ref HEADER_ONLY: Regex =
        Regex::new(r#"^!!! (?:note|warning|tip|caution|important)(?: "[^"]*")?$"#).unwrap();
}

pub(crate) const BODY_INDENT: &str = "    ";

/// Unquote one body line; `None` ends the block
fn body_line(line: &str) -> Option<String> {
    if line.starts_with(BODY_INDENT) {
        Some(line.to_string())
    } else if let Some(rest) = line.strip_prefix("> ") {
        Some(format!("{}{}", BODY_INDENT, rest))
    } else if line == ">" {
        Some(String::new())
    } else if let Some(rest) = line.strip_prefix('>') {
        Some(format!("{}{}", BODY_INDENT, rest))
    } else if line.trim().is_empty() {
        Some(String::new())
    } else {
        None
    }
}

/// Rewrite inline-content and blockquoted admonitions into indented blocks
pub fn fix_admonitions(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        // A titled header also matches INLINE_CONTENT, so test it first
        if HEADER_ONLY.is_match(line) {
            result.push(line.to_string());
        } else if let Some(caps) = INLINE_CONTENT.captures(line) {
            result.push(caps[1].to_string());
            result.push(format!("{}{}", BODY_INDENT, &caps[2]));
        } else {
            result.push(line.to_string());
            i += 1;
            continue;
        }

        i += 1;
        let mut body = Vec::new();
        while let Some(line) = lines.get(i).and_then(|l| body_line(l)) {
            body.push(line);
            i += 1;
        }
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }
        result.extend(body);
        result.push(String::new());
    }

    result.join("\n")
}
