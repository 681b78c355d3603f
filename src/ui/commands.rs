use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{Category, Expense, Goal};
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinDash", cmd_quit, r);
    register_command!("quit", "Quit FinDash", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("s", "Go to Spending", cmd_spending, r);
    register_command!("spending", "Go to Spending", cmd_spending, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("v", "Go to Savings & Goals", cmd_savings, r);
    register_command!("savings", "Go to Savings & Goals", cmd_savings, r);
    register_command!("goals", "Go to Savings & Goals", cmd_savings, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("pay", "Set monthly income (e.g. :pay 3200)", cmd_pay, r);
    register_command!(
        "category",
        "Create category (e.g. :category Groceries)",
        cmd_category,
        r
    );
    register_command!(
        "delete-category",
        "Delete selected category",
        cmd_delete_category,
        r
    );
    register_command!(
        "expense",
        "Record expense (e.g. :expense Groceries 42.50 2024-01-15)",
        cmd_expense,
        r
    );
    register_command!(
        "delete-expense",
        "Delete selected expense",
        cmd_delete_expense,
        r
    );
    register_command!(
        "goal",
        "Add savings goal (e.g. :goal 1200 2024-01-01 2024-06-30)",
        cmd_goal,
        r
    );
    register_command!("delete-goal", "Delete selected goal", cmd_delete_goal, r);
    register_command!(
        "budget",
        "Set category budget (e.g. :budget Groceries 400)",
        cmd_budget,
        r
    );
    register_command!(
        "reset-budgets",
        "Reset all budgets to the even split",
        cmd_reset_budgets,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    app.refresh_overview(db)?;
    Ok(())
}

fn cmd_spending(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Spending;
    app.refresh_spending(db)?;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(db)?;
    Ok(())
}

fn cmd_savings(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Savings;
    app.refresh_savings(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_pay(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :pay <amount>. Example: :pay 3200");
        return Ok(());
    }
    let amount = match Decimal::from_str(args) {
        Ok(a) if a >= Decimal::ZERO => a,
        Ok(_) => {
            app.set_status("Income must not be negative");
            return Ok(());
        }
        Err(_) => {
            app.set_status(format!("Invalid amount: {args}"));
            return Ok(());
        }
    };

    db.set_monthly_income(amount)?;
    app.refresh_all(db)?;
    app.set_status(format!("Monthly income set to {}", format_amount(amount)));
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name>. Example: :category Groceries");
        return Ok(());
    }

    let categories = db.get_categories()?;
    if Category::find_by_name(&categories, args).is_some() {
        app.set_status(format!("Category '{args}' already exists"));
        return Ok(());
    }

    db.insert_category(&Category::new(args.to_string()))?;
    app.refresh_categories(db)?;
    app.refresh_budgets(db)?;
    app.set_status(format!("Created category: {args}"));
    Ok(())
}

fn cmd_delete_category(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(cat) = app.categories.get(app.category_index) else {
        app.set_status("No category selected");
        return Ok(());
    };
    let Some(id) = cat.id else {
        app.set_status("Category has no ID (this shouldn't happen)");
        return Ok(());
    };

    app.confirm_message = format!("Delete category '{}'?", cat.name);
    app.pending_action = Some(PendingAction::DeleteCategory {
        id,
        name: cat.name.clone(),
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// `:expense <category> <amount> [YYYY-MM-DD]` — the date defaults to today.
fn cmd_expense(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let usage = "Usage: :expense <category> <amount> [YYYY-MM-DD]";
    if args.is_empty() {
        app.set_status(usage);
        return Ok(());
    }

    let mut tokens: Vec<&str> = args.split_whitespace().collect();

    // Optional trailing date
    let date_spent = match tokens.last().and_then(|t| parse_date(t)) {
        Some(d) => {
            tokens.pop();
            d
        }
        None => app.today,
    };

    let Some(amount_str) = tokens.pop() else {
        app.set_status(usage);
        return Ok(());
    };
    let amount = match Decimal::from_str(amount_str) {
        Ok(a) if a >= Decimal::ZERO => a,
        Ok(_) => {
            app.set_status("Expense amounts must not be negative");
            return Ok(());
        }
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let category = tokens.join(" ");
    if category.is_empty() {
        app.set_status(usage);
        return Ok(());
    }

    db.insert_expense(&Expense::new(category.clone(), amount, date_spent))?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Recorded {} for {category} on {date_spent}",
        format_amount(amount)
    ));
    Ok(())
}

fn cmd_delete_expense(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(expense) = app.expenses.get(app.expense_index) else {
        app.set_status("No expense selected");
        return Ok(());
    };
    let Some(id) = expense.id else {
        app.set_status("Expense has no ID (this shouldn't happen)");
        return Ok(());
    };

    let label = format!(
        "{} {} on {}",
        format_amount(expense.amount),
        expense.category,
        expense.date_spent
    );
    app.confirm_message = format!("Delete expense {label}?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, label });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// `:goal <target> <start> <end>` — target must be positive, end on or
/// after start. Malformed windows never reach the engine.
fn cmd_goal(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let usage = "Usage: :goal <target> <YYYY-MM-DD> <YYYY-MM-DD>";
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let &[target_str, start_str, end_str] = tokens.as_slice() else {
        app.set_status(usage);
        return Ok(());
    };

    let target = match Decimal::from_str(target_str) {
        Ok(t) if t > Decimal::ZERO => t,
        Ok(_) => {
            app.set_status("Goal target must be positive");
            return Ok(());
        }
        Err(_) => {
            app.set_status(format!("Invalid target: {target_str}"));
            return Ok(());
        }
    };

    let (Some(start_date), Some(end_date)) = (parse_date(start_str), parse_date(end_str)) else {
        app.set_status(usage);
        return Ok(());
    };
    if end_date < start_date {
        app.set_status("Goal end date must not be before its start date");
        return Ok(());
    }

    db.insert_goal(&Goal::new(target, start_date, end_date))?;
    app.refresh_savings(db)?;
    app.set_status(format!(
        "Added {} goal ({start_date} to {end_date})",
        format_amount(target)
    ));
    Ok(())
}

fn cmd_delete_goal(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some((goal, _)) = app.active_goals.get(app.goal_index) else {
        app.set_status("No active goal selected");
        return Ok(());
    };
    let Some(id) = goal.id else {
        app.set_status("Goal has no ID (this shouldn't happen)");
        return Ok(());
    };

    let label = format!("{} goal ending {}", format_amount(goal.target), goal.end_date);
    app.confirm_message = format!("Delete {label}?");
    app.pending_action = Some(PendingAction::DeleteGoal { id, label });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// `:budget <category> <amount>`. Negative amounts are accepted as
/// deliberate overrides; they simply push `unallocated` up.
fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let usage = "Usage: :budget <category> <amount>. Example: :budget Groceries 400";
    if args.is_empty() {
        app.set_status(usage);
        return Ok(());
    }

    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status(usage);
        return Ok(());
    }
    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let Some(name) =
        Category::find_by_name(&app.categories, category_name).map(|c| c.name.clone())
    else {
        app.set_status(format!("Category '{category_name}' not found"));
        return Ok(());
    };

    app.allocation.set(&name, amount);
    db.save_allocation(app.allocation.as_map())?;
    app.refresh_budgets(db)?;
    app.set_status(format!("Budget for {name} set to {}", format_amount(amount)));
    Ok(())
}

fn cmd_reset_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.allocation = crate::engine::Allocation::even_split(app.income, &app.categories);
    db.save_allocation(app.allocation.as_map())?;
    app.refresh_budgets(db)?;
    app.set_status("Budgets reset to the even split");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/findash-expenses.csv")
    } else {
        crate::run::cli::shellexpand(args)
    };

    let count = db.export_expenses_csv(&path, None)?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
