pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT NOT NULL,
    amount    TEXT NOT NULL,
    category  TEXT NOT NULL,
    month     INTEGER NOT NULL,
    year      INTEGER NOT NULL,
    month_key TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_month_key ON transactions(month_key);

CREATE TABLE IF NOT EXISTS budgets (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    category       TEXT NOT NULL UNIQUE,
    monthly_budget TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS category_summary (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    month_key          TEXT NOT NULL,
    category           TEXT NOT NULL,
    spent              TEXT NOT NULL,
    budget             TEXT NOT NULL,
    difference         TEXT NOT NULL,
    percent_used       TEXT NOT NULL,
    day_of_month       INTEGER NOT NULL,
    days_in_month      INTEGER NOT NULL,
    month_progress_pct TEXT NOT NULL,
    projected_spend    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gauge_summary (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    month_key          TEXT NOT NULL,
    total_budget       TEXT NOT NULL,
    total_spent        TEXT NOT NULL,
    percent_used       TEXT NOT NULL,
    day_of_month       INTEGER NOT NULL,
    days_in_month      INTEGER NOT NULL,
    month_progress_pct TEXT NOT NULL,
    projected_spend    TEXT NOT NULL,
    budget_remaining   TEXT NOT NULL
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
