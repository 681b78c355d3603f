mod budget;
mod goals;
mod period;
mod savings;
mod spending;

pub(crate) use budget::{usage_percent, Allocation};
pub(crate) use goals::{active_goals, goal_progress, GoalProgress};
pub(crate) use period::MonthKey;
pub(crate) use savings::{annual_projection, historical_series, monthly_projection};
pub(crate) use spending::{
    category_total_in_month, current_period_total, totals_by_category, totals_by_month,
    MonthlyBucket,
};

#[cfg(test)]
mod tests;
