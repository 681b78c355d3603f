use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Category;

/// Per-category budget amounts, keyed by category display name.
///
/// The map is the unit of persistence: it is loaded whole at startup and
/// written whole after every edit (last write wins). Entries for categories
/// that no longer exist stay in the map and are skipped by views iterating
/// the current category set, but still count toward `unallocated`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Allocation {
    amounts: BTreeMap<String, Decimal>,
}

impl Allocation {
    pub(crate) fn from_map(amounts: BTreeMap<String, Decimal>) -> Self {
        Self { amounts }
    }

    /// Default policy when nothing is persisted: every category receives
    /// `floor(income / count)`. No categories means an empty map.
    pub(crate) fn even_split(income: Decimal, categories: &[Category]) -> Self {
        let mut amounts = BTreeMap::new();
        if !categories.is_empty() {
            let share = (income / Decimal::from(categories.len())).floor();
            for cat in categories {
                amounts.insert(cat.name.clone(), share);
            }
        }
        Self { amounts }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Budget for a category; absent entries read as zero.
    pub(crate) fn amount_for(&self, category: &str) -> Decimal {
        self.amounts.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Upsert without clamping. Negative and over-income values are legal
    /// overrides and simply surface in `unallocated`.
    pub(crate) fn set(&mut self, category: &str, amount: Decimal) {
        self.amounts.insert(category.to_string(), amount);
    }

    /// `income - sum of all entries`, exactly. Negative means over-allocated.
    pub(crate) fn unallocated(&self, income: Decimal) -> Decimal {
        let total: Decimal = self.amounts.values().copied().sum();
        income - total
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, Decimal> {
        &self.amounts
    }
}

/// Spend as a percentage of budget. A zero (or negative) budget reports 0
/// rather than dividing by zero; callers that want to flag "spend with no
/// budget" must test that case themselves.
pub(crate) fn usage_percent(budget: Decimal, spent: Decimal) -> f64 {
    if budget > Decimal::ZERO {
        (spent / budget).to_f64().unwrap_or(0.0) * 100.0
    } else {
        0.0
    }
}
