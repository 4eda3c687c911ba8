//! Regression tests for HTML table conversion

use super::*;
use pretty_assertions::assert_eq;

const ROWSPAN_TABLE: &str = r#"<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td rowspan="2">X</td><td>1</td></tr><tr><td>2</td></tr></tbody></table>"#;

const MANUFACTURER_TABLE: &str = r#"<table>
<thead>
<tr><th>Manufacturer</th><th>Model</th></tr>
</thead>
<tbody>
<tr><td rowspan="3">Honeywell</td><td>Vista 20P</td></tr>
<tr><td>Vista 48</td></tr>
<tr><td>Vista 128</td></tr>
<tr><td>DSC</td><td>PowerSeries</td></tr>
</tbody>
</table>"#;

/// Count unescaped `|` delimiters on a pipe-table line
fn field_count(line: &str) -> usize {
    let mut count = 0;
    let mut prev = '\0';
    for c in line.chars() {
        if c == '|' && prev != '\\' {
            count += 1;
        }
        prev = c;
    }
    count
}

#[test]
fn test_duplicate_scenario() {
    let out = convert_html_tables_str(ROWSPAN_TABLE, &TableOptions::duplicate());
    assert_eq!(out, "| A | B |\n|---|---|\n| X | 1 |\n| X | 2 |");
}

#[test]
fn test_duplicate_places_content_in_every_spanned_row() {
    let markup = r#"<table><thead><tr><th>K</th><th>V</th><th>N</th></tr></thead>
<tbody>
<tr><td>a</td><td rowspan="3">shared</td><td>1</td></tr>
<tr><td>b</td><td>2</td></tr>
<tr><td>c</td><td>3</td></tr>
<tr><td>d</td><td>solo</td><td>4</td></tr>
</tbody></table>"#;
    let flat = flatten_table(markup, &TableOptions::duplicate()).unwrap();
    let col: Vec<&str> = flat.body.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(col, vec!["shared", "shared", "shared", "solo"]);
    assert_eq!(flat.body[1], vec!["b", "shared", "2"]);
}

#[test]
fn test_duplicate_span_past_last_row_extends_grid() {
    let markup = r#"<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td rowspan="2">X</td><td>1</td></tr></tbody></table>"#;
    let flat = flatten_table(markup, &TableOptions::duplicate()).unwrap();
    assert_eq!(flat.body, vec![vec!["X", "1"], vec!["X", ""]]);
}

#[test]
fn test_rowspan_one_is_ordinary_cell() {
    let markup = r#"<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td rowspan="1">X</td><td>1</td></tr><tr><td>Y</td><td>2</td></tr></tbody></table>"#;
    let out = convert_html_tables_str(markup, &TableOptions::duplicate());
    assert_eq!(out, "| A | B |\n|---|---|\n| X | 1 |\n| Y | 2 |");
}

#[test]
fn test_merge_folds_spanned_rows() {
    let flat = flatten_table(MANUFACTURER_TABLE, &TableOptions::merge()).unwrap();
    assert_eq!(flat.header, vec!["Manufacturer", "Model"]);
    assert_eq!(
        flat.body,
        vec![
            vec!["Honeywell", "Vista 20P<br>Vista 48<br>Vista 128"],
            vec!["DSC", "PowerSeries"],
        ]
    );
}

#[test]
fn test_merge_with_slash_line_breaks() {
    let options = TableOptions {
        rowspan: RowspanMode::Merge,
        line_break: LineBreak::Slash,
    };
    let out = convert_html_tables_str(MANUFACTURER_TABLE, &options);
    assert!(out.contains("| Honeywell | Vista 20P / Vista 48 / Vista 128 |"));
}

#[test]
fn test_merge_rejects_span_outside_first_column() {
    let markup = ROWSPAN_TABLE.replace(
        r#"<td rowspan="2">X</td><td>1</td>"#,
        r#"<td>X</td><td rowspan="2">1</td>"#,
    );
    let result = flatten_table(&markup, &TableOptions::merge());
    assert!(matches!(
        result,
        Err(crate::utils::error::ConversionError::UnsupportedShape { .. })
    ));
}

#[test]
fn test_merge_unsupported_shape_leaves_table() {
    let markup = r#"<table><thead><tr><th>A</th><th>B</th><th>C</th></tr></thead><tbody><tr><td rowspan="2">X</td><td>1</td><td>extra</td></tr><tr><td>2</td><td>more</td></tr></tbody></table>"#;
    let output = convert_html_tables(markup, &TableOptions::merge());
    assert_eq!(output.content, markup);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].line, Some(1));
}

#[test]
fn test_fallback_on_unterminated_tag_is_byte_identical() {
    let markup = "<table><thead><tr><th>A</th></tr></thead><tbody><tr><td>1</td><td</tbody></table>";
    let doc = format!("before\n\n{}\n\nafter", markup);
    let output = convert_html_tables(&doc, &TableOptions::default());
    assert_eq!(output.content, doc);
    assert!(output.has_warnings());
    assert_eq!(output.warnings[0].line, Some(3));
}

#[test]
fn test_no_header_stays_html() {
    let markup = "<table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>";
    let flat = flatten_table(markup, &TableOptions::default()).unwrap();
    assert!(flat.header.is_empty());
    assert_eq!(flat.body, vec![vec!["1", "2"]]);

    let output = convert_html_tables(markup, &TableOptions::default());
    assert_eq!(output.content, markup);
    assert!(!output.has_warnings());
}

#[test]
fn test_extra_header_rows_lead_the_body() {
    let markup = "<table><thead><tr><th>A</th><th>B</th></tr><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>";
    let out = convert_html_tables_str(markup, &TableOptions::default());
    assert_eq!(out, "| A | B |\n|---|---|\n| a | b |\n| 1 | 2 |");
}

#[test]
fn test_cell_markup_and_whitespace() {
    let markup = "<table>\n<thead>\n<tr>\n<th><strong>Parameter</strong></th>\n<th>Description</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td><p>Network\n  connectivity</p></td>\n<td>LTE<br/>Ethernet</td>\n</tr>\n</tbody>\n</table>";
    let out = convert_html_tables_str(markup, &TableOptions::default());
    assert_eq!(
        out,
        "| <strong>Parameter</strong> | Description |\n|----------------------------|-------------|\n| Network connectivity | LTE<br>Ethernet |"
    );
}

#[test]
fn test_surrounding_markdown_preserved() {
    let doc = format!("# Title\n\nText before.\n\n{}\n\nText after.\n", ROWSPAN_TABLE);
    let out = convert_html_tables_str(&doc, &TableOptions::default());
    assert_eq!(
        out,
        "# Title\n\nText before.\n\n| A | B |\n|---|---|\n| X | 1 |\n| X | 2 |\n\nText after.\n"
    );
}

#[test]
fn test_conversion_is_idempotent() {
    let doc = format!(
        "{}\n\n{}\n\n<table><tr><td>no header</td></tr></table>\n",
        ROWSPAN_TABLE, MANUFACTURER_TABLE
    );
    for options in [TableOptions::duplicate(), TableOptions::merge()] {
        let once = convert_html_tables_str(&doc, &options);
        let twice = convert_html_tables_str(&once, &options);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_column_count_invariant() {
    let markup = r#"<table><thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>
<tbody>
<tr><td rowspan="2">x|y</td><td>1</td></tr>
<tr><td>2</td><td>3</td><td>4</td><td>overflow</td></tr>
<tr><td>only</td></tr>
</tbody></table>"#;
    let out = convert_html_tables_str(markup, &TableOptions::default());
    let counts: Vec<usize> = out.lines().map(field_count).collect();
    assert_eq!(counts.len(), 5);
    assert!(counts.iter().all(|&c| c == 4), "{:?}\n{}", counts, out);
}

#[test]
fn test_oversized_rowspan_is_clamped() {
    let markup = r#"<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td rowspan="18446744073709551615">X</td><td>1</td></tr></tbody></table>"#;
    let flat = flatten_table(markup, &TableOptions::duplicate()).unwrap();
    assert_eq!(flat.body.len(), MAX_ROWSPAN);
    assert_eq!(flat.body[0], vec!["X", "1"]);
    assert_eq!(flat.body[MAX_ROWSPAN - 1], vec!["X", ""]);

    let merged = flatten_table(markup, &TableOptions::merge()).unwrap();
    assert_eq!(merged.body, vec![vec!["X", "1"]]);
}
