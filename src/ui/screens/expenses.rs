use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::table::SortField;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_expenses();

    let header_cells = SortField::all().iter().enumerate().map(|(i, field)| {
        let arrow = if app.sort.field == Some(*field) {
            format!(" {}", app.sort.direction.arrow())
        } else {
            String::new()
        };
        let mut style = theme::header_style();
        if i == app.header_index {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(format!("{}{arrow}", field.label())).style(style)
    });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = if visible.is_empty() {
        vec![Row::new(vec![
            Cell::from(""),
            Cell::from(Span::styled(
                "No expenses in selected range",
                theme::dim_style(),
            )),
        ])]
    } else {
        visible
            .iter()
            .enumerate()
            .skip(app.row_scroll)
            .take(area.height.saturating_sub(3) as usize)
            .map(|(i, expense)| {
                let amount_style = if expense.amount.is_sign_negative() {
                    theme::refund_style()
                } else {
                    theme::expense_style()
                };
                let amount = Line::from(Span::styled(
                    format_amount(expense.amount),
                    amount_style,
                ))
                .alignment(Alignment::Right);

                let style = if i == app.row_index {
                    theme::selected_style()
                } else if i % 2 == 1 {
                    theme::alt_row_style()
                } else {
                    theme::normal_style()
                };

                Row::new(vec![
                    Cell::from(format_date(expense.transaction_date)),
                    Cell::from(truncate(&expense.description, 40)),
                    Cell::from(amount),
                    Cell::from(truncate(&expense.expense_type, 16)),
                    Cell::from(truncate(&expense.category, 18)),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(18),
    ];

    let title = if app.range.is_unbounded() {
        format!(" Expenses ({}) ", app.expenses.len())
    } else {
        format!(
            " Expenses ({} of {}) {} ",
            visible.len(),
            app.expenses.len(),
            app.range
        )
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
