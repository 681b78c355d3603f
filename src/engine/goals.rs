use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Goal;

/// Fixed month length used when converting remaining days to months.
const DAYS_PER_MONTH: i64 = 30;

/// Derived progress for one active goal at a given reference date.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GoalProgress {
    /// Elapsed share of the goal window, clamped to [0, 100].
    pub(crate) time_progress: f64,
    /// Savings expected over the remaining window at the current rate.
    pub(crate) projected_amount: Decimal,
    pub(crate) will_reach_target: bool,
    pub(crate) days_left: i64,
    /// Projected amount as a share of target, zero-guarded.
    pub(crate) percent_to_target: f64,
}

/// Goals whose window contains `now`, both ends inclusive.
pub(crate) fn active_goals(goals: &[Goal], now: NaiveDate) -> Vec<Goal> {
    goals
        .iter()
        .filter(|g| g.is_active_on(now))
        .cloned()
        .collect()
}

/// Progress for a single goal. `now` is passed in rather than read from the
/// clock so the computation stays deterministic.
pub(crate) fn goal_progress(goal: &Goal, now: NaiveDate, monthly_savings: Decimal) -> GoalProgress {
    let total_days = (goal.end_date - goal.start_date).num_days();
    let elapsed_days = (now - goal.start_date).num_days();

    let time_progress = if total_days == 0 {
        // Start equals end: the window is a single day, done iff reached
        if now >= goal.end_date {
            100.0
        } else {
            0.0
        }
    } else {
        (elapsed_days as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
    };

    let days_left = (goal.end_date - now).num_days().max(0);
    let months_left = Decimal::from(days_left) / Decimal::from(DAYS_PER_MONTH);
    let projected_amount = months_left * monthly_savings;

    let percent_to_target = if goal.target > Decimal::ZERO {
        (projected_amount / goal.target).to_f64().unwrap_or(0.0) * 100.0
    } else {
        0.0
    };

    GoalProgress {
        time_progress,
        projected_amount,
        will_reach_target: projected_amount >= goal.target,
        days_left,
        percent_to_target,
    }
}
