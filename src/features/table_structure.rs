//! HTML table structure repair
//!
//! Word-to-Markdown converters leave tables with headings inside cells,
//! empty rows and header rows split across `rowspan` cells. These passes
//! rewrite the known-bad shapes into plain `<thead>`/`<tbody>` markup that
//! [`crate::html_table`] can later turn into pipe tables.
//!
//! Passes run in order:
//!
//! 1. [`fix_specifications_table`]
//! 2. [`fix_table_headers`]
//! 3. [`fix_empty_rows`]
//! 4. [`fix_malformed_rowspan_tables`]
//! 5. [`clean_table_content`]

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, info};

/// `<th rowspan="2">` header followed by a stray paragraph and `</td>`
const MALFORMED_HEADER: &str =
    r#"<th rowspan="2"><strong>([^<]+)</strong></th>\s*<p>([^<]*)</p>\s*</td>"#;

lazy_static! {
    static ref SPEC_TABLE_HEAD: Regex = Regex::new(
        r#"(?s)<tbody>\s*<tr>\s*<td rowspan="2"><strong>([^<]+)</strong>\s+<p>([^<]*)</p>\s*</td>\s*<td rowspan="2">([^<]+)</td>\s*</tr>"#
    )
    .unwrap();
    static ref GLUED_HEADER: Regex = Regex::new(r"^(Description|Parameter)\s*(.*)$").unwrap();

    static ref HEADING_CELL: Regex =
        Regex::new(r"<td(\s+[^>]*)?><h1[^>]*><strong>([^<]+)</strong></h1>").unwrap();

    static ref EMPTY_ROW: Regex = Regex::new(r"<tr>\s*</tr>").unwrap();
    static ref EMPTY_CELL_ROW: Regex = Regex::new(r"<tr>\s*<td[^>]*>\s*</td>\s*</tr>").unwrap();

    static ref TABLE: Regex = Regex::new(r"(?s)<table[^>]*>.*?</table>").unwrap();
    static ref TABLE_PREFIX: Regex = Regex::new(r"(?s)<table[^>]*>.*?<tbody>").unwrap();
    static ref MALFORMED: Regex = Regex::new(MALFORMED_HEADER).unwrap();
    static ref MALFORMED_ROW: Regex = Regex::new(&format!(
        r"(?s)<tr>\s*{}\s*{}\s*</tr>",
        MALFORMED_HEADER, MALFORMED_HEADER
    ))
    .unwrap();
    static ref TBODY_ROWS: Regex = Regex::new(r"(?s)<tbody>\s*(.*?)\s*</tbody>").unwrap();

    /// Heading with bold text inside a cell, one pattern per closing tag
    static ref STRONG_HEADING_IN_TD: Regex = Regex::new(
        r"(?s)<td([^>]*)><h1[^>]*><strong>([^<]+)</strong></h1>(.*?)</td>"
    )
    .unwrap();
    static ref STRONG_HEADING_IN_TH: Regex = Regex::new(
        r"(?s)<th([^>]*)><h1[^>]*><strong>([^<]+)</strong></h1>(.*?)</th>"
    )
    .unwrap();
    static ref HEADING_IN_CELL: Regex =
        Regex::new(r"<(td|th)([^>]*)><h1[^>]*>([^<]+)</h1>").unwrap();
    static ref HEADER_RULE: Regex = Regex::new(r"(Description|Parameter)\s*:=+\s*").unwrap();
    static ref ROWSPAN_HEADING: Regex =
        Regex::new(r#"<td(\s+rowspan="[^"]+")><h1[^>]*>([^<]+)</h1>"#).unwrap();
    static ref EMPTY_PARAGRAPH: Regex =
        Regex::new(r"<(td|th)([^>]*)><strong>([^<]+)</strong>\s*<p>\s*</p>").unwrap();
}

/// Rebuild a specifications table whose header row is fused with its first data row
///
/// The two `rowspan="2"` cells carry both header and data; the second one
/// glues them together (`DescriptionLTE / Ethernet`).
pub fn fix_specifications_table(content: &str) -> String {
    SPEC_TABLE_HEAD
        .replace_all(content, |caps: &Captures| {
            let (header, data) = match GLUED_HEADER.captures(&caps[3]) {
                Some(split) => (split[1].to_string(), split[2].trim().to_string()),
                None => ("Description".to_string(), caps[3].to_string()),
            };
            info!(first = &caps[1], second = %header, "rebuilt specifications table header");

            format!(
                "<thead>\n<tr>\n<th><strong>{}</strong></th>\n<th><strong>{}</strong></th>\n</tr>\n</thead>\n\
                 <tbody>\n<tr>\n<td><p>{}</p></td>\n<td>{}</td>\n</tr>",
                &caps[1], header, &caps[2], data
            )
        })
        .into_owned()
}

/// `<td><h1><strong>Header</strong></h1>` becomes `<th><strong>Header</strong></th>`
pub fn fix_table_headers(content: &str) -> String {
    HEADING_CELL
        .replace_all(content, |caps: &Captures| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            format!("<th{}><strong>{}</strong></th>", attrs, &caps[2])
        })
        .into_owned()
}

/// Drop rows that are empty or hold a single empty cell
pub fn fix_empty_rows(content: &str) -> String {
    let content = EMPTY_ROW.replace_all(content, "");
    EMPTY_CELL_ROW.replace_all(&content, "").into_owned()
}

fn rebuild_rowspan_table(table: &str) -> Option<String> {
    let found: Vec<(&str, &str)> = MALFORMED
        .captures_iter(table)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect();
    if found.is_empty() {
        return None;
    }
    info!(headers = found.len(), "found table with malformed rowspan headers");
    if found.len() < 2 {
        return None;
    }
    let prefix = TABLE_PREFIX.find(table)?.as_str();

    let mut out = String::with_capacity(table.len());
    out.push_str(prefix);
    out.push_str("\n<tr>\n");
    for (header, _) in &found {
        out.push_str(&format!("<th><strong>{}</strong></th>\n", header));
    }
    out.push_str("</tr>\n<tr>\n");
    for (_, data) in &found {
        out.push_str(&format!("<td><p>{}</p></td>\n", data));
    }
    out.push_str("</tr>\n");

    let remaining = MALFORMED_ROW.replace_all(table, "");
    let remaining = EMPTY_ROW.replace_all(&remaining, "");
    if let Some(rows) = TBODY_ROWS.captures(&remaining) {
        let rows = rows[1].trim();
        if !rows.is_empty() {
            out.push_str(rows);
            out.push('\n');
        }
    }

    out.push_str("</tbody>\n</table>");
    Some(out)
}

/// Rebuild tables whose header row is made of `<th rowspan="2">` cells
/// each trailed by a data paragraph
///
/// Headers become a proper first row, the stray paragraphs the second row,
/// and the remaining body rows follow. Anything after `</tbody>` is dropped.
pub fn fix_malformed_rowspan_tables(content: &str) -> String {
    TABLE
        .replace_all(content, |caps: &Captures| {
            let table = &caps[0];
            rebuild_rowspan_table(table).unwrap_or_else(|| table.to_string())
        })
        .into_owned()
}

/// Unwrap headings in cells, strip `Description :====` rules and empty paragraphs
pub fn clean_table_content(content: &str) -> String {
    let content = STRONG_HEADING_IN_TD.replace_all(content, "<td$1><strong>$2</strong>$3</td>");
    let content = STRONG_HEADING_IN_TH.replace_all(&content, "<th$1><strong>$2</strong>$3</th>");
    let content = HEADING_IN_CELL.replace_all(&content, "<$1$2><strong>$3</strong>");
    let content = HEADER_RULE.replace_all(&content, "$1");
    let content = ROWSPAN_HEADING.replace_all(&content, "<th$1><strong>$2</strong></th>");
    EMPTY_PARAGRAPH
        .replace_all(&content, "<$1$2><strong>$3</strong>")
        .into_owned()
}

/// Apply every table structure pass in order
pub fn fix_table_structure(content: &str) -> String {
    debug!("fixing table structure");
    let content = fix_specifications_table(content);
    let content = fix_table_headers(&content);
    let content = fix_empty_rows(&content);
    let content = fix_malformed_rowspan_tables(&content);
    clean_table_content(&content)
}
