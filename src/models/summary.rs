use rust_decimal::Decimal;

/// Budget-vs-actual for one (month, category) pair. Derived rows, rebuilt
/// from scratch on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummaryRow {
    pub month_key: String,
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub difference: Decimal,
    pub percent_used: Decimal,
    pub day_of_month: u32,
    pub days_in_month: u32,
    pub month_progress_pct: Decimal,
    pub projected_spend: Decimal,
}

/// Month-level aggregate across all categories with spend, feeding the
/// overall progress/limit gauges.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSummaryRow {
    pub month_key: String,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub percent_used: Decimal,
    pub day_of_month: u32,
    pub days_in_month: u32,
    pub month_progress_pct: Decimal,
    pub projected_spend: Decimal,
    pub budget_remaining: Decimal,
}
