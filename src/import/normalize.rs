use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::ColumnMap;
use crate::models::TransactionRecord;

/// Date formats accepted across the supported bank exports. ISO first, then
/// the US forms.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"];

/// Result of normalizing one batch of parsed rows: the records that
/// validated, plus how many rows were dropped.
pub(crate) struct ImportOutcome {
    pub(crate) records: Vec<TransactionRecord>,
    pub(crate) skipped: usize,
}

/// Build transaction records from non-header rows. A row that is malformed
/// (fewer than 3 fields), has an empty or unparseable date, or an amount
/// that fails to parse is skipped and counted, never fatal. Record order
/// matches input order.
pub(crate) fn normalize_rows(rows: &[Vec<String>], columns: &ColumnMap) -> Result<ImportOutcome> {
    let junk = Regex::new(r"[^0-9.\-]")?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        match normalize_row(row, columns, &junk) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    Ok(ImportOutcome { records, skipped })
}

fn normalize_row(row: &[String], columns: &ColumnMap, junk: &Regex) -> Option<TransactionRecord> {
    if row.len() < 3 {
        return None;
    }

    let date_field = row.get(columns.date)?;
    if date_field.is_empty() {
        return None;
    }
    let date = parse_date(date_field)?;
    let amount = parse_amount(row.get(columns.amount)?, junk)?;
    let category = row.get(columns.category).cloned().unwrap_or_default();

    Some(TransactionRecord::new(date, amount, category))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Strip everything that is not a digit, dot or minus sign ("$1,234.56"
/// becomes "1234.56"), then parse. The record constructor discards the sign.
fn parse_amount(raw: &str, junk: &Regex) -> Option<Decimal> {
    let cleaned = junk.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
