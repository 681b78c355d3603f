use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::engine::usage_percent;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, meter, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.categories.is_empty() {
        render_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_header(f, chunks[0], app);
    render_allocation_list(f, chunks[1], app);
}

/// Income and what is left after every category budget is summed. The
/// remainder goes negative when budgets exceed income.
fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let unalloc_color = theme::signed_color(app.unallocated < Decimal::ZERO);
    let line = Line::from(vec![
        Span::styled(" Income ", theme::dim_style()),
        Span::styled(
            format_amount(app.income),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Unallocated ", theme::dim_style()),
        Span::styled(
            format_amount(app.unallocated),
            Style::default()
                .fg(unalloc_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget Planner ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(header, area);
}

fn render_allocation_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, cat)| {
            let budget = app.allocation.amount_for(&cat.name);
            let spent = app
                .current_spending
                .iter()
                .find(|(name, _)| name == &cat.name)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);

            let percent = usage_percent(budget, spent);
            let color = theme::usage_color(percent);

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // Zero budget with real spend never divides; flag it instead
            let trailer = if budget <= Decimal::ZERO && spent > Decimal::ZERO {
                Span::styled(" no budget", Style::default().fg(theme::RED))
            } else {
                Span::styled(
                    format!(" {}", format_percent(percent)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&cat.name, 17)), style),
                Span::styled(
                    format!("{}/{} ", format_amount(spent), format_amount(budget)),
                    Style::default().fg(color),
                ),
                Span::styled(meter(percent / 100.0, 20), Style::default().fg(color)),
                trailer,
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Allocations ({}) ", app.categories.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No categories to budget", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Create one with :category <name>, then :budget <name> <amount>",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget Planner ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}
