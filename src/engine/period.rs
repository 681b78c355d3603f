use chrono::{Datelike, NaiveDate};

/// Calendar-month bucket identifier. Every monthly aggregate in the engine
/// groups by this key.
///
/// Ordering is on the `(year, month)` pair, never on the rendered string:
/// `"2023-9"` sorts before `"2024-1"` even though the strings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl MonthKey {
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-indexed month, no zero padding: "2024-1" .. "2024-12"
        write!(f, "{}-{}", self.year, self.month)
    }
}
