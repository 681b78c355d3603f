use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new(chrono::Local::now().date_naive());
    app.refresh_all(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd bar + 2 borders + 1 header row
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_move_top(app),
        KeyCode::Char('G') => handle_move_bottom(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Overview)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Spending)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Budgets)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Savings)?,
        KeyCode::Char('5') => switch_screen(app, db, Screen::Categories)?,
        KeyCode::Tab => cycle_screen(app, db, 1)?,
        KeyCode::BackTab => cycle_screen(app, db, -1)?,
        KeyCode::Char('D') => handle_delete(app, db)?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();

    let Some(action) = app.pending_action.take() else {
        return Ok(());
    };
    if !confirmed {
        app.set_status("Cancelled");
        return Ok(());
    }

    match action {
        PendingAction::DeleteExpense { id, label } => {
            db.delete_expense(id)?;
            app.refresh_all(db)?;
            app.set_status(format!("Deleted expense: {label}"));
        }
        PendingAction::DeleteCategory { id, name } => {
            // Expenses and allocation entries under this name stay behind
            db.delete_category(id)?;
            app.refresh_all(db)?;
            app.set_status(format!("Deleted category: {name}"));
        }
        PendingAction::DeleteGoal { id, label } => {
            db.delete_goal(id)?;
            app.refresh_savings(db)?;
            app.set_status(format!("Deleted {label}"));
        }
    }
    Ok(())
}

// ── Navigation ───────────────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Overview => app.refresh_overview(db)?,
        Screen::Spending => app.refresh_spending(db)?,
        Screen::Budgets => app.refresh_budgets(db)?,
        Screen::Savings => app.refresh_savings(db)?,
        Screen::Categories => app.refresh_categories(db)?,
    }
    Ok(())
}

fn cycle_screen(app: &mut App, db: &mut Database, step: isize) -> Result<()> {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let len = screens.len() as isize;
    let next = (idx + step).rem_euclid(len) as usize;
    switch_screen(app, db, screens[next])
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Spending => scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            page,
        ),
        Screen::Budgets => scroll_down(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Categories => {
            if app.category_index + 1 < app.categories.len() {
                app.category_index += 1;
            }
        }
        Screen::Savings => {
            if app.goal_index + 1 < app.active_goals.len() {
                app.goal_index += 1;
            }
        }
        Screen::Overview => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Spending => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Categories => app.category_index = app.category_index.saturating_sub(1),
        Screen::Savings => app.goal_index = app.goal_index.saturating_sub(1),
        Screen::Overview => {}
    }
}

fn handle_move_top(app: &mut App) {
    match app.screen {
        Screen::Spending => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Categories => app.category_index = 0,
        Screen::Savings => app.goal_index = 0,
        Screen::Overview => {}
    }
}

fn handle_move_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Spending => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            page,
        ),
        Screen::Budgets => scroll_to_bottom(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Categories => {
            app.category_index = app.categories.len().saturating_sub(1);
        }
        Screen::Savings => {
            app.goal_index = app.active_goals.len().saturating_sub(1);
        }
        Screen::Overview => {}
    }
}

/// D on a list screen queues a deletion behind the y/N confirm prompt.
fn handle_delete(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Spending => commands::handle_command("delete-expense", app, db)?,
        Screen::Categories => commands::handle_command("delete-category", app, db)?,
        Screen::Savings => commands::handle_command("delete-goal", app, db)?,
        Screen::Overview | Screen::Budgets => {
            app.set_status("Nothing to delete on this screen");
        }
    }
    Ok(())
}
