//! GitHub-style callouts to admonitions
//!
//! `> [!NOTE] Title` blockquotes become `!!! note "Title"` admonitions with an
//! indented body. Repeated quote markers (`> > >`) left behind by nested
//! conversions are collapsed to a single `>` first.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use super::admonitions::BODY_INDENT;

/// Callout kinds and their admonition names
pub static CALLOUT_KINDS: phf::Map<&'static str, &'static str> = phf_map! {
    "NOTE" => "note",
    "IMPORTANT" => "important",
    "WARNING" => "warning",
    "CAUTION" => "caution",
    "TIP" => "tip",
};

lazy_static! {
    static ref CALLOUT: Regex = Regex::new(r"^>\s*\[!([A-Z]+)\]\s*(.*)$").unwrap();
    static ref QUOTE: Regex = Regex::new(r"^>\s?(.*)$").unwrap();
    static ref MULTI_QUOTE: Regex = Regex::new(r"^(?:>\s*)+(.*)$").unwrap();
}

/// Admonition name for a callout kind; unknown kinds fall back to `note`
pub fn admonition_kind(callout: &str) -> &'static str {
    CALLOUT_KINDS
        .get(callout.to_uppercase().as_str())
        .copied()
        .unwrap_or("note")
}

/// Collapse repeated `>` prefixes down to one, keeping leading indentation
pub fn normalize_quotes(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|&line| {
            let stripped = line.trim_start();
            if !stripped.starts_with('>') {
                return line.to_string();
            }
            let indent = &line[..line.len() - stripped.len()];
            match MULTI_QUOTE.captures(stripped) {
                Some(caps) => format!("{}> {}", indent, &caps[1]).trim_end().to_string(),
                None => line.to_string(),
            }
        })
        .collect()
}

fn convert_callouts(lines: &[String]) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = CALLOUT.captures(&lines[i]) else {
            output.push(lines[i].clone());
            i += 1;
            continue;
        };

        let kind = admonition_kind(&caps[1]);
        let title = caps[2].trim();
        if title.is_empty() {
            output.push(format!("!!! {}", kind));
        } else {
            output.push(format!("!!! {} \"{}\"", kind, title));
        }

        i += 1;
        let mut body: Vec<&str> = Vec::new();
        while let Some(caps) = lines.get(i).and_then(|l| QUOTE.captures(l)) {
            body.push(caps.get(1).map_or("", |m| m.as_str()));
            i += 1;
        }

        while body.first().is_some_and(|l| l.trim().is_empty()) {
            body.remove(0);
        }
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }

        if body.is_empty() {
            output.push(BODY_INDENT.to_string());
        } else {
            output.extend(
                body.iter()
                    .map(|l| format!("{}{}", BODY_INDENT, l.trim_end())),
            );
        }

        // Markdown parsers need a blank line after the admonition body
        if lines.get(i).is_some_and(|l| !l.trim().is_empty()) {
            output.push(String::new());
        }
    }

    output
}

/// Convert GitHub callouts into admonitions
///
/// The output always ends with a single newline.
pub fn normalize_callouts(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let normalized = normalize_quotes(&lines);
    let mut result = convert_callouts(&normalized).join("\n");
    result.push('\n');
    result
}
