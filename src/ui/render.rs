use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, ViewState};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    render_main(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let bound = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%m/%d/%Y").to_string())
            .unwrap_or_else(|| "--/--/----".into())
    };
    let line = Line::from(vec![
        Span::styled(
            " Expense View ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Start Date: ", theme::dim_style()),
        Span::styled(bound(app.range.start), theme::normal_style()),
        Span::styled("  End Date: ", theme::dim_style()),
        Span::styled(bound(app.range.end), theme::normal_style()),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_main(f: &mut Frame, area: Rect, app: &App) {
    let message = match app.view_state() {
        ViewState::Ready => {
            super::screens::expenses::render(f, area, app);
            return;
        }
        ViewState::Loading => "Loading...",
        ViewState::Empty => "No data available",
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::dim_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(lines).centered().block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::StartDate | InputMode::EndDate => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    };

    let sort = match app.sort.field {
        Some(field) => format!("{field} {}", app.sort.direction.arrow()),
        None => "unsorted".into(),
    };
    let info = match app.view_state() {
        ViewState::Loading => " loading".to_string(),
        ViewState::Empty => " 0 expenses".to_string(),
        ViewState::Ready => format!(
            " {} of {} expenses | {} | {sort}",
            app.visible_expenses().len(),
            app.expenses.len(),
            app.range
        ),
    };

    let right = " 1-5 sort | f/t dates | x clear | ? help ";

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::StartDate | InputMode::EndDate => {
            let prompt = if app.input_mode == InputMode::StartDate {
                "Start date> "
            } else {
                "End date> "
            };
            (
                Line::from(vec![
                    Span::styled(prompt, Style::default().fg(theme::YELLOW)),
                    Span::styled(&app.command_input, theme::command_bar_style()),
                    Span::styled(
                        "  (YYYY-MM-DD, empty clears, Esc keeps)",
                        theme::dim_style(),
                    ),
                ]),
                Some(prompt.len() as u16 + app.command_input.len() as u16),
            )
        }
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let mut help_text = vec![
        Line::from(Span::styled(
            " Expense View Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Sorting"),
        Line::from(Span::styled(
            "  1-5             Sort by Date/Description/Amount/Type/Category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  h/l, Enter      Pick a column header and sort by it",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "                  Sorting the active column again flips the direction",
            theme::dim_style(),
        )),
        Line::from(""),
        section(" Date range"),
        Line::from(Span::styled(
            "  f / t           Edit start / end date   x   Clear both",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Navigation"),
        Line::from(Span::styled(
            "  j/k or Up/Down  Move cursor             g/G  Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-d/u        Page Down/Up            q    Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
