#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new() {
    let cat = Category::new("Food".into());
    assert!(cat.id.is_none());
    assert_eq!(cat.name, "Food");
}

#[test]
fn test_category_display() {
    let cat = Category::new("Groceries".into());
    assert_eq!(format!("{cat}"), "Groceries");
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    let cats = vec![Category::new("Rent".into()), Category::new("Food".into())];
    assert_eq!(Category::find_by_name(&cats, "food").unwrap().name, "Food");
    assert_eq!(Category::find_by_name(&cats, "RENT").unwrap().name, "Rent");
    assert!(Category::find_by_name(&cats, "Transport").is_none());
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new() {
    let e = Expense::new("Food".into(), dec!(12.50), date(2024, 1, 15));
    assert!(e.id.is_none());
    assert_eq!(e.category, "Food");
    assert_eq!(e.amount, dec!(12.50));
    assert_eq!(e.date_spent, date(2024, 1, 15));
}

// ── Goal ──────────────────────────────────────────────────────

#[test]
fn test_goal_active_inside_window() {
    let g = Goal::new(dec!(1200), date(2024, 1, 1), date(2024, 6, 30));
    assert!(g.is_active_on(date(2024, 4, 1)));
}

#[test]
fn test_goal_active_on_boundaries() {
    // The window is closed on both ends
    let g = Goal::new(dec!(1200), date(2024, 1, 1), date(2024, 6, 30));
    assert!(g.is_active_on(date(2024, 1, 1)));
    assert!(g.is_active_on(date(2024, 6, 30)));
}

#[test]
fn test_goal_inactive_outside_window() {
    let g = Goal::new(dec!(1200), date(2024, 1, 1), date(2024, 6, 30));
    assert!(!g.is_active_on(date(2023, 12, 31)));
    assert!(!g.is_active_on(date(2024, 7, 1)));
}

#[test]
fn test_goal_zero_length_window() {
    let g = Goal::new(dec!(100), date(2024, 3, 10), date(2024, 3, 10));
    assert!(g.is_active_on(date(2024, 3, 10)));
    assert!(!g.is_active_on(date(2024, 3, 11)));
}
