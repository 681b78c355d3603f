use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::Database;
use crate::engine;
use crate::engine::{Allocation, MonthKey};
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "budgets" | "b" => cli_budgets(db),
        "goals" | "g" => cli_goals(db),
        "pay" => cli_pay(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("findash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinDash — local-only personal finance dashboard");
    println!();
    println!("Usage: findash [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Print monthly financial summary");
    println!("  budgets                       Print budget allocations and usage");
    println!("  goals                         Print active savings goals");
    println!("  pay <amount>                  Set monthly income");
    println!("  export [path]                 Export expenses to CSV");
    println!("    --month <YYYY-MM>           Limit export to one month");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let key = args
        .first()
        .and_then(|a| parse_month(a))
        .unwrap_or_else(|| MonthKey::of(today));

    let income = db.get_monthly_income()?;
    let expenses = db.get_expenses()?;
    let categories = db.get_categories()?;

    let spent = engine::totals_by_month(&expenses, income)
        .into_iter()
        .find(|b| b.month == key)
        .map(|b| b.expenses)
        .unwrap_or(Decimal::ZERO);
    let remaining = income - spent;
    let monthly_savings = engine::monthly_projection(income, spent);
    let annual = engine::annual_projection(monthly_savings);

    println!("FinDash — {key}");
    println!("{}", "─".repeat(40));
    println!("  Income:       {}", format_amount(income));
    println!("  Spent:        {}", format_amount(spent));
    println!("  Remaining:    {}", format_amount(remaining));
    println!(
        "  Usage:        {}",
        format_percent(engine::usage_percent(income, spent))
    );
    println!("  Savings/mo:   {}", format_amount(monthly_savings));
    println!("  Savings/yr:   {}", format_amount(annual));

    let mut spending: Vec<(String, Decimal)> = categories
        .iter()
        .map(|c| {
            (
                c.name.clone(),
                engine::category_total_in_month(&expenses, &c.name, key),
            )
        })
        .filter(|(_, amt)| *amt > Decimal::ZERO)
        .collect();
    spending.sort_by(|a, b| b.1.cmp(&a.1));

    if !spending.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &spending {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_budgets(db: &mut Database) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let key = MonthKey::of(today);

    let income = db.get_monthly_income()?;
    let categories = db.get_categories()?;
    let expenses = db.get_expenses()?;

    if categories.is_empty() {
        println!("No categories. Create one in the TUI with :category <name>");
        return Ok(());
    }

    let saved = db.load_allocation()?;
    let allocation = if saved.is_empty() {
        Allocation::even_split(income, &categories)
    } else {
        Allocation::from_map(saved)
    };

    println!(
        "{:<20} {:>12} {:>12} {:>8}",
        "Category", "Budget", "Spent", "Usage"
    );
    println!("{}", "─".repeat(56));
    for cat in &categories {
        let budget = allocation.amount_for(&cat.name);
        let spent = engine::category_total_in_month(&expenses, &cat.name, key);
        let usage = engine::usage_percent(budget, spent);
        println!(
            "{:<20} {:>12} {:>12} {:>8}",
            cat.name,
            format_amount(budget),
            format_amount(spent),
            format_percent(usage),
        );
    }
    println!("{}", "─".repeat(56));
    println!(
        "{:<20} {:>12}",
        "Unallocated",
        format_amount(allocation.unallocated(income))
    );

    Ok(())
}

fn cli_goals(db: &mut Database) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let income = db.get_monthly_income()?;
    let expenses = db.get_expenses()?;
    let goals = db.get_goals()?;

    let spent = engine::current_period_total(&expenses, today);
    let monthly_savings = engine::monthly_projection(income, spent);

    let active = engine::active_goals(&goals, today);
    if active.is_empty() {
        println!("No active goals");
        return Ok(());
    }

    println!("Active goals (savings rate {}/mo):", format_amount(monthly_savings));
    println!("{}", "─".repeat(64));
    for goal in &active {
        let p = engine::goal_progress(goal, today, monthly_savings);
        let verdict = if p.will_reach_target {
            "on track".to_string()
        } else {
            format!("{} of target", format_percent(p.percent_to_target))
        };
        println!(
            "  {} by {}  |  {} days left  |  projected {}  |  {}",
            format_amount(goal.target),
            goal.end_date,
            p.days_left,
            format_amount(p.projected_amount),
            verdict,
        );
    }

    Ok(())
}

fn cli_pay(args: &[String], db: &mut Database) -> Result<()> {
    let Some(amount_str) = args.first() else {
        anyhow::bail!("Usage: findash pay <amount>");
    };
    let amount = Decimal::from_str(amount_str)
        .map_err(|_| anyhow::anyhow!("Invalid amount: {amount_str}"))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Income must not be negative");
    }

    db.set_monthly_income(amount)?;
    println!("Monthly income set to {}", format_amount(amount));
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .and_then(|w| parse_month(&w[1]));

    // Output path is the first argument that is neither a flag nor a flag value
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--month" {
            i += 2;
            continue;
        }
        if !args[i].starts_with('-') {
            output_path = Some(shellexpand(&args[i]));
            break;
        }
        i += 1;
    }
    let output_path = output_path.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/findash-expenses.csv")
    });

    let count = db.export_expenses_csv(&output_path, month)?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

/// Accepts "YYYY-MM" (and "YYYY-M") by validating it as the first of the month.
fn parse_month(s: &str) -> Option<MonthKey> {
    NaiveDate::parse_from_str(&format!("{s}-1"), "%Y-%m-%d")
        .ok()
        .map(MonthKey::of)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
