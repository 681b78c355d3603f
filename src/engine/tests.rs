#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Category, Expense, Goal};

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(category: &str, amount: Decimal, y: i32, m: u32, d: u32) -> Expense {
    Expense::new(category.into(), amount, date(y, m, d))
}

fn categories(names: &[&str]) -> Vec<Category> {
    names.iter().map(|n| Category::new((*n).into())).collect()
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_is_one_indexed() {
    let key = MonthKey::of(date(2024, 1, 15));
    assert_eq!(key.year, 2024);
    assert_eq!(key.month, 1);
    assert_eq!(format!("{key}"), "2024-1");
}

#[test]
fn test_month_key_same_month_same_key() {
    assert_eq!(MonthKey::of(date(2024, 3, 1)), MonthKey::of(date(2024, 3, 31)));
    assert_ne!(MonthKey::of(date(2024, 3, 31)), MonthKey::of(date(2024, 4, 1)));
    assert_ne!(MonthKey::of(date(2023, 3, 1)), MonthKey::of(date(2024, 3, 1)));
}

#[test]
fn test_month_key_orders_chronologically_not_lexically() {
    // "2023-9" > "2024-1" lexically ('9' > '1'); chronological order must win
    let sep23 = MonthKey::of(date(2023, 9, 1));
    let jan24 = MonthKey::of(date(2024, 1, 1));
    assert!(sep23 < jan24);

    // "9" vs "12" within one year
    let sep = MonthKey::of(date(2024, 9, 1));
    let dec_ = MonthKey::of(date(2024, 12, 1));
    assert!(sep < dec_);
}

// ── Expense aggregation ───────────────────────────────────────

#[test]
fn test_category_total_in_month_filters_both_axes() {
    let expenses = vec![
        expense("Food", dec!(100), 2024, 1, 5),
        expense("Food", dec!(40), 2024, 2, 5),
        expense("Rent", dec!(500), 2024, 1, 1),
    ];
    let jan = MonthKey::of(date(2024, 1, 20));
    assert_eq!(category_total_in_month(&expenses, "Food", jan), dec!(100));
    assert_eq!(category_total_in_month(&expenses, "Rent", jan), dec!(500));
    assert_eq!(
        category_total_in_month(&expenses, "Transport", jan),
        Decimal::ZERO
    );
}

#[test]
fn test_category_total_empty_set_is_zero() {
    let jan = MonthKey::of(date(2024, 1, 1));
    assert_eq!(category_total_in_month(&[], "Food", jan), Decimal::ZERO);
}

#[test]
fn test_totals_by_category_groups_all_time() {
    let expenses = vec![
        expense("Food", dec!(100), 2024, 1, 5),
        expense("Food", dec!(50), 2024, 2, 5),
        expense("Rent", dec!(500), 2024, 1, 1),
    ];
    let totals = totals_by_category(&expenses);
    assert_eq!(totals.get("Food"), Some(&dec!(150)));
    assert_eq!(totals.get("Rent"), Some(&dec!(500)));
    assert_eq!(totals.len(), 2);
}

#[test]
fn test_totals_by_category_keeps_orphan_names() {
    // Grouping is by name; no referential check against the category set
    let expenses = vec![expense("Gone", dec!(25), 2024, 1, 5)];
    let totals = totals_by_category(&expenses);
    assert_eq!(totals.get("Gone"), Some(&dec!(25)));
}

#[test]
fn test_totals_by_month_scenario() {
    let expenses = vec![
        expense("Food", dec!(100), 2024, 1, 10),
        expense("Food", dec!(50), 2024, 2, 10),
        expense("Rent", dec!(500), 2024, 1, 1),
    ];
    let buckets = totals_by_month(&expenses, dec!(1000));
    assert_eq!(buckets.len(), 2);

    assert_eq!(format!("{}", buckets[0].month), "2024-1");
    assert_eq!(buckets[0].expenses, dec!(600));
    assert_eq!(buckets[0].income, dec!(1000));
    assert_eq!(buckets[0].savings, dec!(400));

    assert_eq!(format!("{}", buckets[1].month), "2024-2");
    assert_eq!(buckets[1].expenses, dec!(50));
    assert_eq!(buckets[1].savings, dec!(950));
}

#[test]
fn test_totals_by_month_ordering_independent_of_input_order() {
    let shuffled = vec![
        expense("A", dec!(1), 2024, 2, 1),
        expense("A", dec!(1), 2023, 9, 1),
        expense("A", dec!(1), 2024, 1, 1),
        expense("A", dec!(1), 2023, 12, 1),
    ];
    let buckets = totals_by_month(&shuffled, Decimal::ZERO);
    let keys: Vec<String> = buckets.iter().map(|b| b.month.to_string()).collect();
    assert_eq!(keys, vec!["2023-9", "2023-12", "2024-1", "2024-2"]);

    // Feeding an already-sorted set back through changes nothing
    let sorted: Vec<Expense> = vec![
        expense("A", dec!(1), 2023, 9, 1),
        expense("A", dec!(1), 2023, 12, 1),
        expense("A", dec!(1), 2024, 1, 1),
        expense("A", dec!(1), 2024, 2, 1),
    ];
    let again = totals_by_month(&sorted, Decimal::ZERO);
    assert_eq!(buckets, again);
}

#[test]
fn test_current_period_total_scopes_month_and_year() {
    let expenses = vec![
        expense("Food", dec!(100), 2024, 4, 2),
        expense("Food", dec!(30), 2024, 4, 28),
        expense("Food", dec!(999), 2024, 3, 31),
        expense("Food", dec!(999), 2023, 4, 15),
    ];
    assert_eq!(
        current_period_total(&expenses, date(2024, 4, 15)),
        dec!(130)
    );
    assert_eq!(current_period_total(&[], date(2024, 4, 15)), Decimal::ZERO);
}

// ── Allocation ────────────────────────────────────────────────

#[test]
fn test_even_split_two_categories() {
    let alloc = Allocation::even_split(dec!(1000), &categories(&["Food", "Rent"]));
    assert_eq!(alloc.amount_for("Food"), dec!(500));
    assert_eq!(alloc.amount_for("Rent"), dec!(500));
    assert_eq!(alloc.unallocated(dec!(1000)), Decimal::ZERO);
}

#[test]
fn test_even_split_floors_uneven_division() {
    let alloc = Allocation::even_split(dec!(1000), &categories(&["Food", "Rent", "Transport"]));
    assert_eq!(alloc.amount_for("Food"), dec!(333));
    assert_eq!(alloc.amount_for("Rent"), dec!(333));
    assert_eq!(alloc.amount_for("Transport"), dec!(333));
    assert_eq!(alloc.unallocated(dec!(1000)), dec!(1));
}

#[test]
fn test_even_split_no_categories_is_empty() {
    let alloc = Allocation::even_split(dec!(1000), &[]);
    assert!(alloc.is_empty());
    assert_eq!(alloc.unallocated(dec!(1000)), dec!(1000));
}

#[test]
fn test_even_split_never_over_allocates() {
    for (income, count) in [(dec!(1000), 3usize), (dec!(7), 2), (dec!(0), 5), (dec!(999), 7)] {
        let names: Vec<String> = (0..count).map(|i| format!("C{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let alloc = Allocation::even_split(income, &categories(&refs));
        let total: Decimal = alloc.as_map().values().copied().sum();
        assert!(total <= income, "over-allocated: {total} > {income}");
    }
}

#[test]
fn test_unallocated_conservation() {
    let mut alloc = Allocation::default();
    assert_eq!(alloc.unallocated(dec!(1000)), dec!(1000));

    alloc.set("Food", dec!(400));
    alloc.set("Rent", dec!(700));
    // Over-allocated goes negative, no clamping
    assert_eq!(alloc.unallocated(dec!(1000)), dec!(-100));

    alloc.set("Rent", dec!(-50));
    assert_eq!(alloc.unallocated(dec!(1000)), dec!(650));
}

#[test]
fn test_set_upserts() {
    let mut alloc = Allocation::even_split(dec!(1000), &categories(&["Food"]));
    assert_eq!(alloc.amount_for("Food"), dec!(1000));
    alloc.set("Food", dec!(250));
    assert_eq!(alloc.amount_for("Food"), dec!(250));
    assert_eq!(alloc.amount_for("Missing"), Decimal::ZERO);
}

#[test]
fn test_usage_percent_zero_budget_is_zero() {
    assert_eq!(usage_percent(Decimal::ZERO, Decimal::ZERO), 0.0);
    assert_eq!(usage_percent(Decimal::ZERO, dec!(150)), 0.0);
    assert_eq!(usage_percent(Decimal::ZERO, dec!(1000000)), 0.0);
}

#[test]
fn test_usage_percent_normal_and_over() {
    assert_eq!(usage_percent(dec!(500), dec!(250)), 50.0);
    assert_eq!(usage_percent(dec!(100), dec!(150)), 150.0);
}

// ── Savings projection ────────────────────────────────────────

#[test]
fn test_monthly_projection_may_go_negative() {
    assert_eq!(monthly_projection(dec!(1000), dec!(600)), dec!(400));
    assert_eq!(monthly_projection(dec!(1000), dec!(1500)), dec!(-500));
}

#[test]
fn test_annual_projection_is_linear() {
    assert_eq!(annual_projection(dec!(300)), dec!(3600));
    assert_eq!(annual_projection(dec!(-100)), dec!(-1200));
}

#[test]
fn test_historical_series_empty_input() {
    assert!(historical_series(&[], dec!(1000)).is_empty());
}

#[test]
fn test_historical_series_matches_monthly_buckets() {
    let expenses = vec![
        expense("Food", dec!(100), 2024, 1, 10),
        expense("Rent", dec!(500), 2024, 1, 1),
    ];
    let series = historical_series(&expenses, dec!(1000));
    assert_eq!(series, totals_by_month(&expenses, dec!(1000)));
}

// ── Goals ─────────────────────────────────────────────────────

#[test]
fn test_active_goals_closed_interval() {
    let goals = vec![
        Goal::new(dec!(100), date(2024, 1, 1), date(2024, 6, 30)),
        Goal::new(dec!(100), date(2024, 4, 1), date(2024, 5, 1)),
        Goal::new(dec!(100), date(2023, 1, 1), date(2023, 12, 31)),
    ];
    // now == start of the second goal: included
    let active = active_goals(&goals, date(2024, 4, 1));
    assert_eq!(active.len(), 2);

    // now == end of the first goal: included
    let active = active_goals(&goals, date(2024, 6, 30));
    assert_eq!(active.len(), 1);

    let active = active_goals(&goals, date(2025, 1, 1));
    assert!(active.is_empty());
}

#[test]
fn test_goal_progress_scenario() {
    let goal = Goal::new(dec!(1200), date(2024, 1, 1), date(2024, 6, 30));
    let p = goal_progress(&goal, date(2024, 4, 1), dec!(300));

    assert_eq!(p.days_left, 90);
    assert_eq!(p.projected_amount, dec!(900));
    assert!(!p.will_reach_target);
    assert_eq!(p.percent_to_target, 75.0);
    assert!(p.time_progress > 0.0 && p.time_progress < 100.0);
}

#[test]
fn test_goal_progress_on_track() {
    let goal = Goal::new(dec!(800), date(2024, 1, 1), date(2024, 6, 30));
    let p = goal_progress(&goal, date(2024, 4, 1), dec!(300));
    assert_eq!(p.projected_amount, dec!(900));
    assert!(p.will_reach_target);
    assert_eq!(p.percent_to_target, 112.5);
}

#[test]
fn test_goal_progress_clamps_outside_window() {
    // Only reachable when the active filter is bypassed; progress must
    // still stay inside [0, 100]
    let goal = Goal::new(dec!(100), date(2024, 3, 1), date(2024, 3, 31));
    let before = goal_progress(&goal, date(2024, 1, 1), dec!(100));
    assert_eq!(before.time_progress, 0.0);

    let after = goal_progress(&goal, date(2024, 5, 1), dec!(100));
    assert_eq!(after.time_progress, 100.0);
    assert_eq!(after.days_left, 0);
}

#[test]
fn test_goal_progress_zero_length_window() {
    let goal = Goal::new(dec!(100), date(2024, 3, 10), date(2024, 3, 10));
    let p = goal_progress(&goal, date(2024, 3, 10), dec!(100));
    // now >= end, so the window counts as fully elapsed, no division by zero
    assert_eq!(p.time_progress, 100.0);
    assert_eq!(p.days_left, 0);
    assert_eq!(p.projected_amount, Decimal::ZERO);
}

#[test]
fn test_goal_progress_zero_target_guard() {
    let goal = Goal::new(Decimal::ZERO, date(2024, 1, 1), date(2024, 6, 30));
    let p = goal_progress(&goal, date(2024, 4, 1), dec!(300));
    assert_eq!(p.percent_to_target, 0.0);
    // Zero target is trivially reachable
    assert!(p.will_reach_target);
}

#[test]
fn test_goal_days_left_floors_at_zero() {
    let goal = Goal::new(dec!(100), date(2024, 1, 1), date(2024, 1, 31));
    let p = goal_progress(&goal, date(2024, 1, 31), dec!(100));
    assert_eq!(p.days_left, 0);
    assert_eq!(p.projected_amount, Decimal::ZERO);
}

#[test]
fn test_goal_months_left_uses_thirty_day_months() {
    let goal = Goal::new(dec!(1000), date(2024, 1, 1), date(2024, 3, 1));
    // 2024-01-16 -> 2024-03-01 is 45 days; 45 / 30 = 1.5 months
    let p = goal_progress(&goal, date(2024, 1, 16), dec!(200));
    assert_eq!(p.days_left, 45);
    assert_eq!(p.projected_amount, dec!(300));
}
