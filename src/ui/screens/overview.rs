use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine::usage_percent;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category breakdown
            Constraint::Length(3), // Monthly trend sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
    render_trend_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(f, cards[0], "Income", app.income, theme::TEXT, None);
    render_card(
        f,
        cards[1],
        "Spent So Far",
        app.current_spent,
        theme::usage_color(app.percent_of_income),
        Some(format!("{} of income", format_percent(app.percent_of_income))),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        app.remaining,
        theme::signed_color(app.remaining < Decimal::ZERO),
        None,
    );
    render_card(
        f,
        cards[3],
        "Savings / mo",
        app.monthly_savings,
        theme::signed_color(app.monthly_savings < Decimal::ZERO),
        Some(format!("{} / yr", format_amount(app.annual_savings))),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    if app.category_totals.is_empty() {
        let block = breakdown_block(" Spending by Category ");
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses recorded yet. Add one with :expense",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_category_chart(f, halves[0], app);
    render_share_list(f, halves[1], app);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .category_totals
        .iter()
        .take(12)
        .map(|(name, amt)| {
            let val = amt.to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(breakdown_block(" Spending by Category "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

/// Each category's share of the all-time total, largest first.
fn render_share_list(f: &mut Frame, area: Rect, app: &App) {
    let grand_total: Decimal = app.category_totals.iter().map(|(_, amt)| *amt).sum();

    let lines: Vec<Line> = app
        .category_totals
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(name, amt)| {
            let share = usage_percent(grand_total, *amt);
            Line::from(vec![
                Span::styled(format!(" {:<14}", truncate(name, 13)), theme::normal_style()),
                Span::styled(format!("{:>12}", format_amount(*amt)), theme::normal_style()),
                Span::styled(
                    format!("  ({})", format_percent(share)),
                    theme::dim_style(),
                ),
            ])
        })
        .collect();

    let list = Paragraph::new(lines).block(breakdown_block(" Breakdown "));
    f.render_widget(list, area);
}

fn render_trend_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .monthly_series
        .iter()
        .map(|bucket| bucket.expenses.to_u64().unwrap_or(0))
        .collect();

    let sparkline = Sparkline::default()
        .block(breakdown_block(" Monthly Spending Trend "))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}

fn breakdown_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}
