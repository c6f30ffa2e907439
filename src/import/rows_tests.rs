#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ── parse_rows ────────────────────────────────────────────────

#[test]
fn test_parse_basic() {
    let rows = parse_rows("Date,Amount,Category\n2025-01-05,45.00,Food\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["Date", "Amount", "Category"]);
    assert_eq!(rows[1], vec!["2025-01-05", "45.00", "Food"]);
}

#[test]
fn test_parse_skips_blank_lines() {
    let rows = parse_rows("a,b\n\n\nc,d\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["c", "d"]);
}

#[test]
fn test_parse_skips_whitespace_only_lines() {
    let rows = parse_rows("a,b\n   \nc,d\n").unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_parse_keeps_rows_of_empty_fields() {
    // ",," is not a blank line; it carries three empty fields.
    let rows = parse_rows("a,b,c\n,,\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["", "", ""]);
}

#[test]
fn test_parse_trims_fields() {
    let rows = parse_rows(" a , b \n").unwrap();
    assert_eq!(rows[0], vec!["a", "b"]);
}

#[test]
fn test_parse_quoted_comma() {
    let rows = parse_rows("2025-01-05,\"Coffee, Shop\",4.50\n").unwrap();
    assert_eq!(rows[0][1], "Coffee, Shop");
}

#[test]
fn test_parse_quoted_currency() {
    let rows = parse_rows("2025-01-05,\"$1,234.56\",Food\n").unwrap();
    assert_eq!(rows[0][1], "$1,234.56");
}

#[test]
fn test_parse_escaped_quote_inside_quoted_field() {
    let rows = parse_rows("\"say \"\"hi\"\"\",x\n").unwrap();
    assert_eq!(rows[0][0], "say \"hi\"");
}

#[test]
fn test_parse_crlf_line_endings() {
    let rows = parse_rows("a,b\r\nc,d\r\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["c", "d"]);
}

#[test]
fn test_parse_ragged_rows_kept_as_is() {
    let rows = parse_rows("a,b,c\nd,e\n").unwrap();
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[1].len(), 2);
}

#[test]
fn test_parse_empty_input() {
    let rows = parse_rows("").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_parse_no_trailing_newline() {
    let rows = parse_rows("a,b\nc,d").unwrap();
    assert_eq!(rows.len(), 2);
}

// ── pad_rows ──────────────────────────────────────────────────

#[test]
fn test_pad_rows_to_first_row_width() {
    let mut rows = vec![
        vec!["a".into(), "b".into(), "c".into()],
        vec!["d".into()],
        vec!["e".into(), "f".into()],
    ];
    pad_rows(&mut rows);
    assert_eq!(rows[1], vec!["d", "", ""]);
    assert_eq!(rows[2], vec!["e", "f", ""]);
}

#[test]
fn test_pad_rows_leaves_long_rows_alone() {
    let mut rows = vec![
        vec!["a".into(), "b".into()],
        vec!["c".into(), "d".into(), "e".into()],
    ];
    pad_rows(&mut rows);
    assert_eq!(rows[1].len(), 3);
}

#[test]
fn test_pad_rows_empty() {
    let mut rows: Vec<Vec<String>> = Vec::new();
    pad_rows(&mut rows);
    assert!(rows.is_empty());
}

// ── read_rows ─────────────────────────────────────────────────

#[test]
fn test_read_rows_from_file() {
    let file = make_csv_file("Date,Amount,Category\n2025-01-05,45.00,Food\n");
    let rows = read_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_read_rows_missing_file() {
    let result = read_rows(std::path::Path::new("/nonexistent/file.csv"));
    assert!(result.is_err());
}
