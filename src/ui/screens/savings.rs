use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, meter};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Projection cards
            Constraint::Min(8),    // Active goals
            Constraint::Length(3), // Savings history sparkline
        ])
        .split(area);

    render_projection_cards(f, chunks[0], app);
    render_goals(f, chunks[1], app);
    render_history(f, chunks[2], app);
}

fn render_projection_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_card(f, cards[0], "Monthly Savings", app.monthly_savings);
    render_card(f, cards[1], "Annual Savings (Projected)", app.annual_savings);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let color = theme::signed_color(amount < Decimal::ZERO);
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_goals(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Active Goals ({}) ", app.active_goals.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.active_goals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No goals active today",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :goal <target> <start> <end>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, (goal, progress)) in app.active_goals.iter().enumerate() {
        let title_style = if i == app.goal_index {
            theme::selected_style()
        } else {
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD)
        };

        let verdict = if progress.will_reach_target {
            Span::styled("on track", Style::default().fg(theme::GREEN))
        } else {
            Span::styled(
                format!("{} of target", format_percent(progress.percent_to_target)),
                Style::default().fg(theme::RED),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} goal ", format_amount(goal.target)),
                title_style,
            ),
            Span::styled(
                format!("{} to {} | {} days left | projected ", goal.start_date, goal.end_date, progress.days_left),
                theme::dim_style(),
            ),
            Span::styled(
                format_amount(progress.projected_amount),
                theme::normal_style(),
            ),
            Span::styled(" | ", theme::dim_style()),
            verdict,
        ]));

        lines.push(Line::from(vec![
            Span::styled("   time    ", theme::dim_style()),
            Span::styled(
                meter(progress.time_progress / 100.0, 30),
                Style::default().fg(theme::ACCENT),
            ),
            Span::styled(
                format!(" {}", format_percent(progress.time_progress)),
                theme::dim_style(),
            ),
        ]));

        let savings_ratio = progress.percent_to_target.min(100.0) / 100.0;
        let savings_color = if progress.percent_to_target >= 100.0 {
            theme::GREEN
        } else if progress.percent_to_target >= 50.0 {
            theme::YELLOW
        } else {
            theme::RED
        };
        lines.push(Line::from(vec![
            Span::styled("   savings ", theme::dim_style()),
            Span::styled(meter(savings_ratio, 30), Style::default().fg(savings_color)),
            Span::styled(
                format!(" {}", format_percent(progress.percent_to_target.min(100.0))),
                theme::dim_style(),
            ),
        ]));

        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).block(block);
    f.render_widget(list, area);
}

/// Savings per month, oldest first. Months saved at a loss render as empty
/// columns; the sparkline cannot go below zero.
fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .monthly_series
        .iter()
        .map(|bucket| bucket.savings.max(Decimal::ZERO).to_u64().unwrap_or(0))
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Savings History ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::GREEN));

    f.render_widget(sparkline, area);
}
