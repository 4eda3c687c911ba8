//! Honeywell Vista 48 special-settings table
//!
//! The PDF lays this table out as three `Section | Data` tables side by side,
//! which the converter reads as one six-column table. Split it back into
//! three two-column tables.

const SECTION_MARKER: &str = "SPECIAL SETTINGS FOR HONEYWELL VISTA 48 PANEL";
const TABLE_START: &str = "set the following sections as described:\n\n";
const TABLE_END: &str = "\n\nWhen all required settings";

/// Header rows for the three output tables (the first keeps a plain data column)
const TABLE_HEADERS: [[&str; 2]; 3] = [
    ["| Section | Data |", "|:-------:|------|"],
    ["| Section | Data |", "|:-------:|:----:|"],
    ["| Section | Data |", "|:-------:|:----:|"],
];

/// Split a pipe-table row into trimmed cells, dropping the outer empty ones
fn split_row(line: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.first() == Some(&"") {
        parts.remove(0);
    }
    if parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}

/// Split the six-column Vista 48 table into three tables
///
/// Text without the section marker, the table delimiters or a six-column
/// header row is returned as-is.
pub fn fix_vista48_table(content: &str) -> String {
    let Some(section_at) = content.find(SECTION_MARKER) else {
        return content.to_string();
    };
    let (before, after_marker) = content.split_at(section_at);

    let (Some(start), Some(end)) = (after_marker.find(TABLE_START), after_marker.find(TABLE_END))
    else {
        return content.to_string();
    };
    let table_at = start + TABLE_START.len();
    if end < table_at {
        return content.to_string();
    }

    let intro = &after_marker[..table_at];
    let table = &after_marker[table_at..end];
    let outro = &after_marker[end..];

    let mut rows = table.trim().split('\n').filter(|line| line.contains('|'));

    // Only the six-column source layout is split; anything else, including
    // already-split output, is left alone
    match rows.next() {
        Some(header) if split_row(header).len() >= 6 => {}
        _ => return content.to_string(),
    }

    // The separator row of the source table is replaced too
    let data_rows = rows.skip(1);

    let mut tables: Vec<Vec<String>> = TABLE_HEADERS
        .iter()
        .map(|rows| rows.iter().map(|r| r.to_string()).collect())
        .collect();

    for line in data_rows {
        let cells = split_row(line);
        if cells.len() < 6 {
            continue;
        }
        tables[0].push(format!("| {} | {} |", cells[0], cells[1]));
        tables[1].push(format!("| {} | {} |", cells[2], cells[3]));
        // The third column pair runs out before the others
        if !cells[4].is_empty() {
            tables[2].push(format!("| {} | {} |", cells[4], cells[5]));
        }
    }

    let rendered: Vec<String> = tables.iter().map(|t| t.join("\n")).collect();
    format!("{}{}{}{}", before, intro, rendered.join("\n\n"), outro)
}
