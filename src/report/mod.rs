use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{BudgetEntry, CategorySummaryRow, GaugeSummaryRow, TransactionRecord};

/// The two derived summary tables, rebuilt together on every refresh.
pub(crate) struct Report {
    pub(crate) category_rows: Vec<CategorySummaryRow>,
    pub(crate) gauge_rows: Vec<GaugeSummaryRow>,
}

struct MonthGroup {
    month: u32,
    year: i32,
    by_category: BTreeMap<String, Decimal>,
}

/// Recompute both summary tables from the full transaction log and the
/// budget lookup. `today` decides which month counts as in-progress; callers
/// pass the wall clock, tests pass a fixed date.
///
/// Months are emitted in ascending lexical month-key order ("10/2025" sorts
/// before "9/2025"), matching the order the dashboard layer has always
/// consumed. Categories sort alphabetically within a month. Only (month,
/// category) pairs with at least one transaction produce rows; a budgeted
/// category with no spend that month contributes neither a category row nor
/// budget to that month's gauge totals.
pub(crate) fn build_report(
    transactions: &[TransactionRecord],
    budgets: &[BudgetEntry],
    today: NaiveDate,
) -> Report {
    let budget_lookup: BTreeMap<&str, Decimal> = budgets
        .iter()
        .map(|b| (b.category.as_str(), b.monthly_budget))
        .collect();

    let mut months: BTreeMap<String, MonthGroup> = BTreeMap::new();
    for txn in transactions {
        let group = months
            .entry(txn.month_key.clone())
            .or_insert_with(|| MonthGroup {
                month: txn.month,
                year: txn.year,
                by_category: BTreeMap::new(),
            });
        *group
            .by_category
            .entry(txn.category.clone())
            .or_insert(Decimal::ZERO) += txn.amount;
    }

    let mut category_rows = Vec::new();
    let mut gauge_rows = Vec::new();

    for (month_key, group) in &months {
        let days_in_month = days_in_month(group.year, group.month);
        let is_current = group.month == today.month() && group.year == today.year();
        // Past and future months are treated as fully elapsed.
        let day_of_month = if is_current { today.day() } else { days_in_month };
        let month_progress_pct = percent(Decimal::from(day_of_month), Decimal::from(days_in_month));

        let mut total_spent = Decimal::ZERO;
        let mut total_budget = Decimal::ZERO;

        for (category, &spent) in &group.by_category {
            let budget = budget_lookup
                .get(category.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            total_spent += spent;
            total_budget += budget;

            category_rows.push(CategorySummaryRow {
                month_key: month_key.clone(),
                category: category.clone(),
                spent,
                budget,
                difference: budget - spent,
                percent_used: percent(spent, budget),
                day_of_month,
                days_in_month,
                month_progress_pct,
                projected_spend: project(spent, is_current, day_of_month, days_in_month),
            });
        }

        gauge_rows.push(GaugeSummaryRow {
            month_key: month_key.clone(),
            total_budget,
            total_spent,
            percent_used: percent(total_spent, total_budget),
            day_of_month,
            days_in_month,
            month_progress_pct,
            projected_spend: project(total_spent, is_current, day_of_month, days_in_month),
            budget_remaining: total_budget - total_spent,
        });
    }

    Report {
        category_rows,
        gauge_rows,
    }
}

/// numerator/denominator as a percentage, 2 decimal places. A zero
/// denominator reports 0, never NaN or infinity.
fn percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        (numerator / denominator * Decimal::from(100)).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

/// Linear run-rate projection for the in-progress month; an elapsed month
/// has no projection, its spend IS the total.
fn project(spent: Decimal, is_current: bool, day_of_month: u32, days_in_month: u32) -> Decimal {
    if is_current && day_of_month > 0 {
        (spent / Decimal::from(day_of_month) * Decimal::from(days_in_month)).round_dp(2)
    } else {
        spent
    }
}

/// Last day of the given month under Gregorian rules.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
