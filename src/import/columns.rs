use anyhow::{bail, Result};

const DATE_HEADERS: &[&str] = &["date", "transaction date"];
const AMOUNT_HEADERS: &[&str] = &["amount", "total", "price"];
const CATEGORY_HEADERS: &[&str] = &["category", "type"];

/// Indices of the three columns the importer consumes. Any other columns in
/// the export are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) date: usize,
    pub(crate) amount: usize,
    pub(crate) category: usize,
}

impl ColumnMap {
    /// Locate the date, amount and category columns in the header row by
    /// case-insensitive exact match against known header names. The leftmost
    /// matching column wins. Fails, naming the discovered headers, if any of
    /// the three is absent; the caller aborts the import with no partial
    /// effect.
    pub(crate) fn detect(headers: &[String]) -> Result<Self> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let date = find_column(&lowered, DATE_HEADERS);
        let amount = find_column(&lowered, AMOUNT_HEADERS);
        let category = find_column(&lowered, CATEGORY_HEADERS);

        match (date, amount, category) {
            (Some(date), Some(amount), Some(category)) => Ok(Self {
                date,
                amount,
                category,
            }),
            _ => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push("date");
                }
                if amount.is_none() {
                    missing.push("amount");
                }
                if category.is_none() {
                    missing.push("category");
                }
                bail!(
                    "CSV is missing required column(s): {}. Found headers: {}",
                    missing.join(", "),
                    headers.join(", ")
                );
            }
        }
    }
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
