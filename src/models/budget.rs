use rust_decimal::Decimal;

/// A monthly spending limit for one category. Categories act as unique keys
/// in the budget lookup; a category with no entry is treated as budget 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEntry {
    pub id: Option<i64>,
    pub category: String,
    pub monthly_budget: Decimal,
}

impl BudgetEntry {
    pub fn new(category: String, monthly_budget: Decimal) -> Self {
        Self {
            id: None,
            category,
            monthly_budget,
        }
    }
}
