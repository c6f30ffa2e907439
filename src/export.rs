use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::db::Database;

/// Write the four tables as CSV files into `dir`. The downstream dashboard
/// layer consumes these; column order is part of the contract.
pub(crate) fn export_tables(db: &Database, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    Ok(vec![
        write_transactions(db, dir.join("transactions.csv"))?,
        write_budgets(db, dir.join("budgets.csv"))?,
        write_category_summary(db, dir.join("category_summary.csv"))?,
        write_gauge_summary(db, dir.join("gauge_summary.csv"))?,
    ])
}

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))
}

fn write_transactions(db: &Database, path: PathBuf) -> Result<PathBuf> {
    let mut wtr = open_writer(&path)?;
    wtr.write_record(["Date", "Amount", "Category", "Month", "Year", "Month-Year"])?;
    for txn in db.get_transactions()? {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", txn.amount),
            txn.category,
            txn.month.to_string(),
            txn.year.to_string(),
            txn.month_key,
        ])?;
    }
    wtr.flush()?;
    Ok(path)
}

fn write_budgets(db: &Database, path: PathBuf) -> Result<PathBuf> {
    let mut wtr = open_writer(&path)?;
    wtr.write_record(["Category", "Monthly Budget"])?;
    for entry in db.get_budgets()? {
        wtr.write_record([entry.category, format!("{:.2}", entry.monthly_budget)])?;
    }
    wtr.flush()?;
    Ok(path)
}

fn write_category_summary(db: &Database, path: PathBuf) -> Result<PathBuf> {
    let mut wtr = open_writer(&path)?;
    wtr.write_record([
        "Month-Year",
        "Category",
        "Total Spent",
        "Monthly Budget",
        "Difference",
        "Percent Used",
        "Day of Month",
        "Days in Month",
        "Month Progress %",
        "Projected Spending",
    ])?;
    for row in db.get_category_summary(None)? {
        wtr.write_record([
            row.month_key,
            row.category,
            format!("{:.2}", row.spent),
            format!("{:.2}", row.budget),
            format!("{:.2}", row.difference),
            format!("{:.2}", row.percent_used),
            row.day_of_month.to_string(),
            row.days_in_month.to_string(),
            format!("{:.2}", row.month_progress_pct),
            format!("{:.2}", row.projected_spend),
        ])?;
    }
    wtr.flush()?;
    Ok(path)
}

fn write_gauge_summary(db: &Database, path: PathBuf) -> Result<PathBuf> {
    let mut wtr = open_writer(&path)?;
    wtr.write_record([
        "Month-Year",
        "Total Budget",
        "Total Spent",
        "Percent Used",
        "Day of Month",
        "Days in Month",
        "Month Progress %",
        "Projected Monthly Spending",
        "Budget Remaining",
    ])?;
    for row in db.get_gauge_summary(None)? {
        wtr.write_record([
            row.month_key,
            format!("{:.2}", row.total_budget),
            format!("{:.2}", row.total_spent),
            format!("{:.2}", row.percent_used),
            row.day_of_month.to_string(),
            row.days_in_month.to_string(),
            format!("{:.2}", row.month_progress_pct),
            format!("{:.2}", row.projected_spend),
            format!("{:.2}", row.budget_remaining),
        ])?;
    }
    wtr.flush()?;
    Ok(path)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
