use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::engine;
use crate::engine::{Allocation, GoalProgress, MonthKey, MonthlyBucket};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Spending,
    Budgets,
    Savings,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Spending,
            Self::Budgets,
            Self::Savings,
            Self::Categories,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Spending => write!(f, "Spending"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Savings => write!(f, "Savings"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending deletion awaiting a y/N confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
    DeleteCategory { id: i64, name: String },
    DeleteGoal { id: i64, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// Reference date for every time-sensitive computation. Captured once
    /// at startup so a refresh never straddles a month boundary.
    pub(crate) today: NaiveDate,
    pub(crate) current_month: MonthKey,

    // Raw records
    pub(crate) income: Decimal,
    pub(crate) categories: Vec<Category>,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) goals: Vec<Goal>,

    // Overview
    pub(crate) current_spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) percent_of_income: f64,
    pub(crate) category_totals: Vec<(String, Decimal)>,
    pub(crate) monthly_series: Vec<MonthlyBucket>,
    pub(crate) expense_count: i64,

    // Budgets
    pub(crate) allocation: Allocation,
    pub(crate) unallocated: Decimal,
    pub(crate) current_spending: Vec<(String, Decimal)>,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Savings
    pub(crate) monthly_savings: Decimal,
    pub(crate) annual_savings: Decimal,
    pub(crate) active_goals: Vec<(Goal, GoalProgress)>,
    pub(crate) goal_index: usize,

    // Spending list
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Categories list
    pub(crate) category_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            today,
            current_month: MonthKey::of(today),

            income: Decimal::ZERO,
            categories: Vec::new(),
            expenses: Vec::new(),
            goals: Vec::new(),

            current_spent: Decimal::ZERO,
            remaining: Decimal::ZERO,
            percent_of_income: 0.0,
            category_totals: Vec::new(),
            monthly_series: Vec::new(),
            expense_count: 0,

            allocation: Allocation::default(),
            unallocated: Decimal::ZERO,
            current_spending: Vec::new(),
            budget_index: 0,
            budget_scroll: 0,

            monthly_savings: Decimal::ZERO,
            annual_savings: Decimal::ZERO,
            active_goals: Vec::new(),
            goal_index: 0,

            expense_index: 0,
            expense_scroll: 0,

            category_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_overview(&mut self, db: &Database) -> Result<()> {
        self.income = db.get_monthly_income()?;
        let expenses = db.get_expenses()?;

        self.current_spent = engine::current_period_total(&expenses, self.today);
        self.remaining = self.income - self.current_spent;
        // Same zero-guard shape as budget usage: zero income reports 0%
        self.percent_of_income = engine::usage_percent(self.income, self.current_spent);

        let mut totals: Vec<(String, Decimal)> =
            engine::totals_by_category(&expenses).into_iter().collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        self.category_totals = totals;

        self.monthly_series = engine::historical_series(&expenses, self.income);
        self.monthly_savings = engine::monthly_projection(self.income, self.current_spent);
        self.annual_savings = engine::annual_projection(self.monthly_savings);
        self.expense_count = db.get_expense_count()?;
        self.expenses = expenses;
        Ok(())
    }

    pub(crate) fn refresh_spending(&mut self, db: &Database) -> Result<()> {
        self.expenses = db.get_expenses()?;
        self.expense_count = db.get_expense_count()?;
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
            self.expense_scroll = self.expense_scroll.min(self.expense_index);
        }
        Ok(())
    }

    /// Load the persisted allocation, falling back to the even split when
    /// nothing has been saved yet. Per-category spend is scoped to the
    /// current month; stale allocation entries are not surfaced here.
    pub(crate) fn refresh_budgets(&mut self, db: &Database) -> Result<()> {
        self.income = db.get_monthly_income()?;
        self.categories = db.get_categories()?;

        let saved = db.load_allocation()?;
        self.allocation = if saved.is_empty() {
            Allocation::even_split(self.income, &self.categories)
        } else {
            Allocation::from_map(saved)
        };
        self.unallocated = self.allocation.unallocated(self.income);

        let expenses = db.get_expenses()?;
        let key = MonthKey::of(self.today);
        self.current_spending = self
            .categories
            .iter()
            .map(|c| {
                (
                    c.name.clone(),
                    engine::category_total_in_month(&expenses, &c.name, key),
                )
            })
            .collect();

        if self.budget_index >= self.categories.len() {
            self.budget_index = self.categories.len().saturating_sub(1);
            self.budget_scroll = self.budget_scroll.min(self.budget_index);
        }
        Ok(())
    }

    pub(crate) fn refresh_savings(&mut self, db: &Database) -> Result<()> {
        self.income = db.get_monthly_income()?;
        let expenses = db.get_expenses()?;

        self.current_spent = engine::current_period_total(&expenses, self.today);
        self.monthly_savings = engine::monthly_projection(self.income, self.current_spent);
        self.annual_savings = engine::annual_projection(self.monthly_savings);
        self.monthly_series = engine::historical_series(&expenses, self.income);

        self.goals = db.get_goals()?;
        self.active_goals = engine::active_goals(&self.goals, self.today)
            .into_iter()
            .map(|g| {
                let progress = engine::goal_progress(&g, self.today, self.monthly_savings);
                (g, progress)
            })
            .collect();

        if self.goal_index >= self.active_goals.len() {
            self.goal_index = self.active_goals.len().saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, db: &Database) -> Result<()> {
        self.categories = db.get_categories()?;
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_overview(db)?;
        self.refresh_spending(db)?;
        self.refresh_budgets(db)?;
        self.refresh_savings(db)?;
        self.refresh_categories(db)?;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
