use rust_decimal::Decimal;

use crate::models::Expense;

use super::spending::{totals_by_month, MonthlyBucket};

/// Income minus the current period's spend. Negative when spending outruns income.
pub(crate) fn monthly_projection(income: Decimal, current_period_total: Decimal) -> Decimal {
    income - current_period_total
}

/// Straight-line extrapolation over twelve months. No compounding.
pub(crate) fn annual_projection(monthly_savings: Decimal) -> Decimal {
    monthly_savings * Decimal::from(12)
}

/// Monthly income/expense/savings series for trend display, oldest first.
pub(crate) fn historical_series(expenses: &[Expense], income: Decimal) -> Vec<MonthlyBucket> {
    totals_by_month(expenses, income)
}
