use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single dated spend, keyed to a category by display name.
///
/// The category field is a plain name rather than a foreign key: an expense
/// whose name matches no current category still aggregates under that name.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Option<i64>,
    pub category: String,
    pub amount: Decimal,
    pub date_spent: NaiveDate,
}

impl Expense {
    pub fn new(category: String, amount: Decimal, date_spent: NaiveDate) -> Self {
        Self {
            id: None,
            category,
            amount,
            date_spent,
        }
    }
}
