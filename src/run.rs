use anyhow::{bail, Result};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::db::Database;
use crate::models::{month_key, BudgetEntry};
use crate::report;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "import" => cli_load(&args[2..], db, LoadMode::Append),
        "replace" => cli_load(&args[2..], db, LoadMode::Replace),
        "budget" => cli_budget(&args[2..], db),
        "refresh" => cli_refresh(db),
        "summary" | "s" => cli_summary(&args[2..], db),
        "gauges" | "g" => cli_gauges(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("clarity {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("Clarity — CSV import, budget-vs-actual summaries, dashboard table export");
    println!();
    println!("Usage: clarity <command>");
    println!();
    println!("Commands:");
    println!("  import <file.csv>             Append a bank-export CSV to the transaction log");
    println!("  replace <file.csv>            Replace the whole transaction log with a CSV");
    println!("  budget list                   List budget categories and monthly limits");
    println!("  budget set <category> <amt>   Set (or update) a category's monthly budget");
    println!("  budget remove <category>      Remove a category's budget");
    println!("  refresh                       Recompute the summary tables from the log");
    println!("  summary [month/year]          Print budget-vs-actual for one month");
    println!("  gauges                        Print month-level gauge totals for all months");
    println!("  export [directory]            Write all four tables as CSV files");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum LoadMode {
    Append,
    Replace,
}

fn cli_load(args: &[String], db: &mut Database, mode: LoadMode) -> Result<()> {
    let verb = match mode {
        LoadMode::Append => "import",
        LoadMode::Replace => "replace",
    };
    if args.is_empty() {
        bail!("Usage: clarity {verb} <file.csv>");
    }

    let file_path = &args[0];
    let path = Path::new(file_path);
    if !path.exists() {
        bail!("File not found: {file_path}");
    }

    let mut rows = crate::import::read_rows(path)?;
    if mode == LoadMode::Replace {
        crate::import::pad_rows(&mut rows);
    }
    if rows.len() < 2 {
        println!("No data found in CSV.");
        return Ok(());
    }

    let columns = crate::import::ColumnMap::detect(&rows[0])?;
    let outcome = crate::import::normalize_rows(&rows[1..], &columns)?;

    if outcome.records.is_empty() {
        // Informational, not an error; the log and summaries stay untouched.
        println!(
            "No valid transaction rows found in CSV ({} skipped).",
            outcome.skipped
        );
        return Ok(());
    }

    let count = match mode {
        LoadMode::Append => db.insert_transactions_batch(&outcome.records)?,
        LoadMode::Replace => db.replace_transactions(&outcome.records)?,
    };
    refresh_summaries(db)?;

    let action = match mode {
        LoadMode::Append => format!("Imported {count} transactions"),
        LoadMode::Replace => format!("Replaced transaction log with {count} transactions"),
    };
    if outcome.skipped > 0 {
        println!("{action} ({} rows skipped)", outcome.skipped);
    } else {
        println!("{action}");
    }
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("list") | None => {
            let budgets = db.get_budgets()?;
            if budgets.is_empty() {
                println!("No budgets set");
                return Ok(());
            }
            println!("{:<28} Monthly Budget", "Category");
            println!("{}", "─".repeat(44));
            for entry in &budgets {
                println!("{:<28} ${:>10.2}", entry.category, entry.monthly_budget);
            }
            Ok(())
        }
        Some("set") => {
            let (category, amount) = match (args.get(1), args.get(2)) {
                (Some(c), Some(a)) => (c, a),
                _ => bail!("Usage: clarity budget set <category> <amount>"),
            };
            let amount = Decimal::from_str(amount.trim_start_matches('$'))
                .map_err(|_| anyhow::anyhow!("Not a valid amount: {amount}"))?;
            if amount < Decimal::ZERO {
                bail!("Budget amounts must be non-negative");
            }
            db.upsert_budget(&BudgetEntry::new(category.clone(), amount.round_dp(2)))?;
            refresh_summaries(db)?;
            println!("Budget for {category} set to ${amount:.2}");
            Ok(())
        }
        Some("remove") => {
            let Some(category) = args.get(1) else {
                bail!("Usage: clarity budget remove <category>");
            };
            if db.delete_budget(category)? {
                refresh_summaries(db)?;
                println!("Removed budget for {category}");
            } else {
                println!("No budget set for {category}");
            }
            Ok(())
        }
        Some(other) => bail!("Unknown budget subcommand: {other}"),
    }
}

fn cli_refresh(db: &mut Database) -> Result<()> {
    let (categories, months) = refresh_summaries(db)?;
    println!("Summary tables refreshed: {categories} category rows across {months} months");
    Ok(())
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let key = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(current_month_key);

    refresh_summaries(db)?;
    let gauges = db.get_gauge_summary(Some(&key))?;
    let rows = db.get_category_summary(Some(&key))?;
    if gauges.is_empty() && rows.is_empty() {
        println!("No transactions for {key}");
        return Ok(());
    }

    println!("Clarity — {key}");
    println!("{}", "─".repeat(72));
    for gauge in &gauges {
        println!(
            "  Spent ${:.2} of ${:.2} ({:.2}% used, {:.2}% of month elapsed)",
            gauge.total_spent, gauge.total_budget, gauge.percent_used, gauge.month_progress_pct
        );
        println!(
            "  Projected ${:.2} — remaining ${:.2}",
            gauge.projected_spend, gauge.budget_remaining
        );
    }

    if !rows.is_empty() {
        println!();
        println!(
            "{:<24} {:>10} {:>10} {:>10} {:>8} {:>12}",
            "Category", "Spent", "Budget", "Diff", "Used%", "Projected"
        );
        println!("{}", "─".repeat(80));
        for row in &rows {
            println!(
                "{:<24} {:>10.2} {:>10.2} {:>10.2} {:>8.2} {:>12.2}",
                row.category,
                row.spent,
                row.budget,
                row.difference,
                row.percent_used,
                row.projected_spend
            );
        }
    }
    Ok(())
}

fn cli_gauges(db: &mut Database) -> Result<()> {
    refresh_summaries(db)?;
    let gauges = db.get_gauge_summary(None)?;
    if gauges.is_empty() {
        println!("No transactions in the log");
        return Ok(());
    }

    println!(
        "{:<10} {:>12} {:>12} {:>8} {:>12} {:>12}",
        "Month", "Budget", "Spent", "Used%", "Projected", "Remaining"
    );
    println!("{}", "─".repeat(72));
    for gauge in &gauges {
        println!(
            "{:<10} {:>12.2} {:>12.2} {:>8.2} {:>12.2} {:>12.2}",
            gauge.month_key,
            gauge.total_budget,
            gauge.total_spent,
            gauge.percent_used,
            gauge.projected_spend,
            gauge.budget_remaining
        );
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let dir = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| ".".into());

    refresh_summaries(db)?;
    let files = crate::export::export_tables(db, Path::new(&dir))?;
    println!("Exported {} tables to {dir}", files.len());
    for file in &files {
        println!("  {}", file.display());
    }
    Ok(())
}

/// Rebuild both summary tables from the full log against today's date.
/// Returns (category row count, month count).
fn refresh_summaries(db: &mut Database) -> Result<(usize, usize)> {
    let transactions = db.get_transactions()?;
    let budgets = db.get_budgets()?;
    let today = chrono::Local::now().date_naive();
    let built = report::build_report(&transactions, &budgets, today);
    db.replace_summaries(&built.category_rows, &built.gauge_rows)?;
    Ok((built.category_rows.len(), built.gauge_rows.len()))
}

fn current_month_key() -> String {
    let today = chrono::Local::now().date_naive();
    month_key(today.month(), today.year())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
