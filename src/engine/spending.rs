use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Expense;

use super::period::MonthKey;

/// One calendar month of aggregated activity. Income is the constant
/// monthly figure, so `savings = income - expenses` per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyBucket {
    pub(crate) month: MonthKey,
    pub(crate) expenses: Decimal,
    pub(crate) income: Decimal,
    pub(crate) savings: Decimal,
}

/// Sum of expenses for one category in one calendar month. No match sums to zero.
pub(crate) fn category_total_in_month(
    expenses: &[Expense],
    category: &str,
    key: MonthKey,
) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.category == category && MonthKey::of(e.date_spent) == key)
        .map(|e| e.amount)
        .sum()
}

/// All-time totals grouped by category name, for breakdown views.
pub(crate) fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.category.clone()).or_default() += e.amount;
    }
    totals
}

/// One bucket per month present in the expense set, chronologically ascending.
/// Accumulation is exact; rounding is left to the presentation layer.
pub(crate) fn totals_by_month(expenses: &[Expense], income: Decimal) -> Vec<MonthlyBucket> {
    let mut by_month: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
    for e in expenses {
        *by_month.entry(MonthKey::of(e.date_spent)).or_default() += e.amount;
    }
    // BTreeMap iterates in MonthKey order, which is (year, month) order
    by_month
        .into_iter()
        .map(|(month, spent)| MonthlyBucket {
            month,
            expenses: spent,
            income,
            savings: income - spent,
        })
        .collect()
}

/// Sum of expenses falling in the same month and year as `today`.
pub(crate) fn current_period_total(expenses: &[Expense], today: NaiveDate) -> Decimal {
    let key = MonthKey::of(today);
    expenses
        .iter()
        .filter(|e| MonthKey::of(e.date_spent) == key)
        .map(|e| e.amount)
        .sum()
}
