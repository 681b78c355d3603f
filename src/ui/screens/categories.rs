use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No categories yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <name>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block_with_title(" Categories (0) "));
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Name", "All-Time Spent", "Budget"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let all_time = app
                .category_totals
                .iter()
                .find(|(name, _)| name == &cat.name)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);
            let budget = app.allocation.amount_for(&cat.name);

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", truncate(&cat.name, 24))),
                Cell::from(format_amount(all_time)),
                Cell::from(format_amount(budget)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block_with_title(&format!(
            " Categories ({}) ",
            app.categories.len()
        )));

    f.render_widget(table, area);
}

fn block_with_title(title: &str) -> Block<'static> {
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
