use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// One imported spend entry in the append-only transaction log.
///
/// Amounts are stored as spend magnitude: the sign of the source figure is
/// discarded at construction, so `amount` is never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub month_key: String,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, amount: Decimal, category: String) -> Self {
        let month = date.month();
        let year = date.year();
        Self {
            id: None,
            date,
            amount: amount.abs().round_dp(2),
            category,
            month,
            year,
            month_key: month_key(month, year),
        }
    }
}

/// Month identifier in "month/year" form: 1-based month, no zero padding.
pub fn month_key(month: u32, year: i32) -> String {
    format!("{month}/{year}")
}
