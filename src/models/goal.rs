use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A savings target over a date window. The window is inclusive on both ends.
#[derive(Debug, Clone)]
pub struct Goal {
    pub id: Option<i64>,
    pub target: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Goal {
    pub fn new(target: Decimal, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            target,
            start_date,
            end_date,
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
