mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// SQLite-backed table store: the append-only transaction log, the budget
/// lookup, and the two derived summary tables the dashboard layer reads.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_budgets()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_budgets()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Seed the budget lookup with a starter set the first time the database
    /// is created. User edits via `budget set` take over from there.
    fn seed_default_budgets(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let defaults = [
            ("Bills & Utilities", "300"),
            ("Dining & Drinks", "250"),
            ("Entertainment", "150"),
            ("Food & Dining", "600"),
            ("Groceries", "500"),
            ("Health & Fitness", "100"),
            ("Shopping", "250"),
            ("Transportation", "200"),
            ("Travel", "150"),
        ];

        let tx = self.conn.transaction()?;
        for (category, amount) in &defaults {
            tx.execute(
                "INSERT OR IGNORE INTO budgets (category, monthly_budget) VALUES (?1, ?2)",
                params![category, amount],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Transaction log ───────────────────────────────────────

    /// Append records after the log's last row. Prior rows are never touched.
    pub(crate) fn insert_transactions_batch(
        &mut self,
        records: &[TransactionRecord],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for record in records {
            tx.execute(
                "INSERT INTO transactions (date, amount, category, month, year, month_key)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.date.format("%Y-%m-%d").to_string(),
                    record.amount.to_string(),
                    record.category,
                    record.month,
                    record.year,
                    record.month_key,
                ],
            )?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Drop the existing log and write a fresh one in a single transaction.
    pub(crate) fn replace_transactions(&mut self, records: &[TransactionRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        for record in records {
            tx.execute(
                "INSERT INTO transactions (date, amount, category, month, year, month_key)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.date.format("%Y-%m-%d").to_string(),
                    record.amount.to_string(),
                    record.category,
                    record.month,
                    record.year,
                    record.month_key,
                ],
            )?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Full log in insertion order.
    pub(crate) fn get_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, month, year, month_key
             FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(1)?;
            let amount_str: String = row.get(2)?;
            Ok(TransactionRecord {
                id: Some(row.get(0)?),
                date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(3)?,
                month: row.get(4)?,
                year: row.get(5)?,
                month_key: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budgets(&self) -> Result<Vec<BudgetEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, category, monthly_budget FROM budgets ORDER BY category")?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            Ok(BudgetEntry {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                monthly_budget: Decimal::from_str(&amount_str).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn upsert_budget(&self, entry: &BudgetEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO budgets (category, monthly_budget)
             VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET monthly_budget = ?2",
            params![entry.category, entry.monthly_budget.to_string()],
        )?;
        Ok(())
    }

    /// Returns false when no entry existed for the category.
    pub(crate) fn delete_budget(&self, category: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM budgets WHERE category = ?1", params![category])?;
        Ok(affected > 0)
    }

    // ── Summary tables ────────────────────────────────────────

    /// Clear-then-rewrite of both derived tables, in one transaction so the
    /// dashboard layer never observes a half-written refresh. Row order
    /// follows the slices, preserved by rowid on read-back.
    pub(crate) fn replace_summaries(
        &mut self,
        category_rows: &[CategorySummaryRow],
        gauge_rows: &[GaugeSummaryRow],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM category_summary", [])?;
        tx.execute("DELETE FROM gauge_summary", [])?;

        for row in category_rows {
            tx.execute(
                "INSERT INTO category_summary
                 (month_key, category, spent, budget, difference, percent_used,
                  day_of_month, days_in_month, month_progress_pct, projected_spend)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.month_key,
                    row.category,
                    row.spent.to_string(),
                    row.budget.to_string(),
                    row.difference.to_string(),
                    row.percent_used.to_string(),
                    row.day_of_month,
                    row.days_in_month,
                    row.month_progress_pct.to_string(),
                    row.projected_spend.to_string(),
                ],
            )?;
        }

        for row in gauge_rows {
            tx.execute(
                "INSERT INTO gauge_summary
                 (month_key, total_budget, total_spent, percent_used,
                  day_of_month, days_in_month, month_progress_pct,
                  projected_spend, budget_remaining)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row.month_key,
                    row.total_budget.to_string(),
                    row.total_spent.to_string(),
                    row.percent_used.to_string(),
                    row.day_of_month,
                    row.days_in_month,
                    row.month_progress_pct.to_string(),
                    row.projected_spend.to_string(),
                    row.budget_remaining.to_string(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub(crate) fn get_category_summary(
        &self,
        month_key: Option<&str>,
    ) -> Result<Vec<CategorySummaryRow>> {
        // Month keys contain no wildcard characters, so LIKE doubles as an
        // exact match; "%" selects every month.
        let pattern = month_key.unwrap_or("%");
        let mut stmt = self.conn.prepare(
            "SELECT month_key, category, spent, budget, difference, percent_used,
                    day_of_month, days_in_month, month_progress_pct, projected_spend
             FROM category_summary WHERE month_key LIKE ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(CategorySummaryRow {
                month_key: row.get(0)?,
                category: row.get(1)?,
                spent: decimal_column(row, 2)?,
                budget: decimal_column(row, 3)?,
                difference: decimal_column(row, 4)?,
                percent_used: decimal_column(row, 5)?,
                day_of_month: row.get(6)?,
                days_in_month: row.get(7)?,
                month_progress_pct: decimal_column(row, 8)?,
                projected_spend: decimal_column(row, 9)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_gauge_summary(
        &self,
        month_key: Option<&str>,
    ) -> Result<Vec<GaugeSummaryRow>> {
        let pattern = month_key.unwrap_or("%");
        let mut stmt = self.conn.prepare(
            "SELECT month_key, total_budget, total_spent, percent_used,
                    day_of_month, days_in_month, month_progress_pct,
                    projected_spend, budget_remaining
             FROM gauge_summary WHERE month_key LIKE ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(GaugeSummaryRow {
                month_key: row.get(0)?,
                total_budget: decimal_column(row, 1)?,
                total_spent: decimal_column(row, 2)?,
                percent_used: decimal_column(row, 3)?,
                day_of_month: row.get(4)?,
                days_in_month: row.get(5)?,
                month_progress_pct: decimal_column(row, 6)?,
                projected_spend: decimal_column(row, 7)?,
                budget_remaining: decimal_column(row, 8)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn decimal_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Ok(Decimal::from_str(&text).unwrap_or_default())
}
