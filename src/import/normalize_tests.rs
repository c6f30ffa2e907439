#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn map() -> ColumnMap {
    ColumnMap {
        date: 0,
        amount: 1,
        category: 2,
    }
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_normalize_basic() {
    let rows = vec![row(&["2025-01-05", "45.00", "Food"])];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.skipped, 0);

    let rec = &outcome.records[0];
    assert_eq!(rec.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    assert_eq!(rec.amount, dec!(45.00));
    assert_eq!(rec.category, "Food");
    assert_eq!(rec.month_key, "1/2025");
}

#[test]
fn test_normalize_us_date_format() {
    let rows = vec![row(&["01/15/2024", "4.50", "Coffee Shops"])];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(
        outcome.records[0].date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[test]
fn test_normalize_amount_is_absolute() {
    let rows = vec![
        row(&["2025-01-05", "-45.00", "Food"]),
        row(&["2025-01-06", "30.00", "Food"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records[0].amount, dec!(45.00));
    assert_eq!(outcome.records[1].amount, dec!(30.00));
}

#[test]
fn test_normalize_strips_currency_noise() {
    let rows = vec![
        row(&["2025-01-05", "$45.00", "Food"]),
        row(&["2025-01-06", "$1,234.56", "Rent"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records[0].amount, dec!(45.00));
    assert_eq!(outcome.records[1].amount, dec!(1234.56));
}

#[test]
fn test_normalize_skips_short_rows() {
    let rows = vec![
        row(&["2025-01-05", "45.00"]),
        row(&["2025-01-06", "30.00", "Food"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn test_normalize_skips_empty_date() {
    let rows = vec![row(&["", "45.00", "Food"])];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn test_normalize_skips_unparseable_date() {
    // A bad date drops that row only; the rest of the batch still imports.
    let rows = vec![
        row(&["not-a-date", "45.00", "Food"]),
        row(&["2025-01-06", "30.00", "Food"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.records[0].amount, dec!(30.00));
}

#[test]
fn test_normalize_skips_unparseable_amount() {
    let rows = vec![
        row(&["2025-01-05", "n/a", "Food"]),
        row(&["2025-01-06", "", "Food"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.skipped, 2);
}

#[test]
fn test_normalize_missing_category_field_is_empty_label() {
    let wide = ColumnMap {
        date: 0,
        amount: 1,
        category: 3,
    };
    let rows = vec![row(&["2025-01-05", "45.00", "extra"])];
    let outcome = normalize_rows(&rows, &wide).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].category, "");
}

#[test]
fn test_normalize_counts_add_up() {
    // Every input row lands in exactly one bucket: imported or skipped.
    let rows = vec![
        row(&["2025-01-05", "45.00", "Food"]),
        row(&["bogus", "45.00", "Food"]),
        row(&["2025-01-06", "bogus", "Food"]),
        row(&["2025-01-07", "12.00", "Travel"]),
        row(&["short"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records.len() + outcome.skipped, rows.len());
    assert_eq!(outcome.records.len(), 2);
}

#[test]
fn test_normalize_preserves_input_order() {
    let rows = vec![
        row(&["2025-02-01", "1.00", "B"]),
        row(&["2025-01-01", "2.00", "A"]),
    ];
    let outcome = normalize_rows(&rows, &map()).unwrap();
    assert_eq!(outcome.records[0].category, "B");
    assert_eq!(outcome.records[1].category, "A");
}

#[test]
fn test_normalize_empty_batch() {
    let outcome = normalize_rows(&[], &map()).unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.skipped, 0);
}
