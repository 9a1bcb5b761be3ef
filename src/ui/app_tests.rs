#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use ratatui::{backend::TestBackend, Terminal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, LoadState, ViewState};
use super::commands::handle_command;
use super::render::render;
use crate::models::ExpenseRecord;
use crate::table::{DateRange, SortDirection, SortField};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn expense(id: i64, date: &str, description: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord {
        id,
        transaction_date: NaiveDateTime::parse_from_str(
            &format!("{date} 00:00:00"),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap(),
        description: description.into(),
        amount,
        expense_type: "Card".into(),
        category: "Food".into(),
    }
}

fn loaded_app() -> App {
    let mut app = App::new(day("2024-02-01"));
    app.finish_load(vec![
        expense(1, "2024-01-05", "Coffee", dec!(12.5)),
        expense(2, "2024-01-10", "Bus", dec!(3.0)),
    ]);
    app
}

fn visible_ids(app: &App) -> Vec<i64> {
    app.visible_expenses().iter().map(|e| e.id).collect()
}

fn held_ids(app: &App) -> Vec<i64> {
    app.expenses.iter().map(|e| e.id).collect()
}

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
    terminal.draw(|f| render(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

// ── load lifecycle ────────────────────────────────────────────

#[test]
fn test_new_app_is_loading() {
    let app = App::new(day("2024-02-01"));
    assert_eq!(app.load_state, LoadState::Loading);
    assert_eq!(app.view_state(), ViewState::Loading);
}

#[test]
fn test_empty_load_is_no_data_not_loading() {
    let mut app = App::new(day("2024-02-01"));
    app.finish_load(Vec::new());
    assert_eq!(app.view_state(), ViewState::Empty);
}

#[test]
fn test_load_stores_records_verbatim() {
    let app = loaded_app();
    assert_eq!(app.view_state(), ViewState::Ready);
    assert_eq!(held_ids(&app), vec![1, 2]);
}

#[test]
fn test_reload_forgets_sort_keeps_range() {
    let mut app = loaded_app();
    app.sort_by(SortField::Amount, None);
    app.set_start_date(Some(day("2024-01-06")));

    app.begin_load();
    assert_eq!(app.view_state(), ViewState::Loading);
    app.finish_load(vec![expense(3, "2024-01-20", "Taxi", dec!(20))]);

    assert_eq!(app.sort.field, None);
    assert_eq!(app.range.start, Some(day("2024-01-06")));
    assert_eq!(visible_ids(&app), vec![3]);
}

// ── sort + filter through the view ────────────────────────────

#[test]
fn test_sort_then_filter_scenario() {
    let mut app = loaded_app();
    let direction = app.sort_by(SortField::Amount, None);
    assert_eq!(direction, SortDirection::Ascending);
    assert_eq!(held_ids(&app), vec![2, 1]);

    app.set_range(DateRange::new(Some(day("2024-01-06")), Some(day("2024-01-12"))));
    assert_eq!(visible_ids(&app), vec![2]);
    // The held collection is never narrowed by the filter.
    assert_eq!(held_ids(&app), vec![2, 1]);
}

#[test]
fn test_repeat_sort_toggles_direction() {
    let mut app = loaded_app();
    assert_eq!(app.sort_by(SortField::Amount, None), SortDirection::Ascending);
    assert_eq!(app.sort_by(SortField::Amount, None), SortDirection::Descending);
    assert_eq!(held_ids(&app), vec![1, 2]);
    assert_eq!(app.sort_by(SortField::Category, None), SortDirection::Ascending);
}

#[test]
fn test_sort_moves_header_cursor() {
    let mut app = loaded_app();
    app.sort_by(SortField::Category, None);
    assert_eq!(app.header_field(), SortField::Category);
}

#[test]
fn test_filtered_view_tracks_state_changes() {
    let mut app = loaded_app();
    app.set_end_date(Some(day("2024-01-05")));
    assert_eq!(visible_ids(&app), vec![1]);
    app.set_end_date(None);
    assert_eq!(visible_ids(&app), vec![1, 2]);
    app.set_start_date(Some(day("2024-01-10")));
    assert_eq!(visible_ids(&app), vec![2]);
}

#[test]
fn test_inverted_range_warns() {
    let mut app = loaded_app();
    app.set_range(DateRange::new(Some(day("2024-01-10")), Some(day("2024-01-05"))));
    assert!(app.visible_expenses().is_empty());
    assert_eq!(app.status_message, "Start date is after end date");
}

#[test]
fn test_range_while_loading_reports_no_count() {
    let mut app = App::new(day("2024-02-01"));
    app.set_start_date(Some(day("2024-01-06")));
    assert_eq!(app.view_state(), ViewState::Loading);
    assert!(!app.status_message.contains("Showing"));
    assert!(app.status_message.contains("01/06/2024"));

    app.finish_load(vec![
        expense(1, "2024-01-05", "Coffee", dec!(12.5)),
        expense(2, "2024-01-10", "Bus", dec!(3.0)),
    ]);
    app.set_end_date(Some(day("2024-01-31")));
    assert!(app.status_message.starts_with("Showing 1 expenses"));
}

// ── commands ──────────────────────────────────────────────────

#[test]
fn test_command_sort_with_direction() {
    let mut app = loaded_app();
    handle_command("sort amount desc", &mut app).unwrap();
    assert_eq!(app.sort.field, Some(SortField::Amount));
    assert_eq!(app.sort.direction, SortDirection::Descending);
    assert_eq!(held_ids(&app), vec![1, 2]);
}

#[test]
fn test_command_sort_unknown_column() {
    let mut app = loaded_app();
    handle_command("sort id", &mut app).unwrap();
    assert_eq!(app.sort.field, None);
    assert!(app.status_message.contains("unknown column"));
}

#[test]
fn test_command_sort_rejects_extra_arguments() {
    let mut app = loaded_app();
    handle_command("sort amount desc junk", &mut app).unwrap();
    assert_eq!(app.sort.field, None);
    assert_eq!(held_ids(&app), vec![1, 2]);
    assert!(app.status_message.starts_with("Usage: :sort"));

    handle_command("sort", &mut app).unwrap();
    assert!(app.status_message.starts_with("Usage: :sort"));
}

#[test]
fn test_command_sort_before_load_is_ignored() {
    let mut app = App::new(day("2024-02-01"));
    handle_command("s amount", &mut app).unwrap();
    assert_eq!(app.sort.field, None);
    assert_eq!(app.status_message, "Nothing to sort");
}

#[test]
fn test_command_dates() {
    let mut app = loaded_app();
    handle_command("from 2024-01-06", &mut app).unwrap();
    assert_eq!(visible_ids(&app), vec![2]);
    handle_command("to 01/09/2024", &mut app).unwrap();
    assert!(app.visible_expenses().is_empty());
    handle_command("clear", &mut app).unwrap();
    assert!(app.range.is_unbounded());

    handle_command("range 2024-01-01 today", &mut app).unwrap();
    assert_eq!(
        app.range,
        DateRange::new(Some(day("2024-01-01")), Some(day("2024-02-01")))
    );
    handle_command("from", &mut app).unwrap();
    assert_eq!(app.range.start, None);
}

#[test]
fn test_command_bad_date_keeps_bound() {
    let mut app = loaded_app();
    handle_command("from 2024-01-06", &mut app).unwrap();
    handle_command("from someday", &mut app).unwrap();
    assert_eq!(app.range.start, Some(day("2024-01-06")));
    assert_eq!(app.status_message, "Invalid date: someday");
}

#[test]
fn test_command_reload_quit_help_unknown() {
    let mut app = loaded_app();
    handle_command("reload", &mut app).unwrap();
    assert!(app.reload_requested);
    handle_command("help", &mut app).unwrap();
    assert!(app.show_help);
    handle_command("bogus", &mut app).unwrap();
    assert_eq!(app.status_message, "Unknown command: bogus");
    handle_command("q", &mut app).unwrap();
    assert!(!app.running);
}

// ── rendering ─────────────────────────────────────────────────

#[test]
fn test_render_loading() {
    let app = App::new(day("2024-02-01"));
    assert!(screen_text(&app).contains("Loading..."));
}

#[test]
fn test_render_no_data() {
    let mut app = App::new(day("2024-02-01"));
    app.finish_load(Vec::new());
    let text = screen_text(&app);
    assert!(text.contains("No data available"));
    assert!(!text.contains("Loading..."));
}

#[test]
fn test_render_rows_and_sort_arrow() {
    let mut app = loaded_app();
    app.sort_by(SortField::Amount, None);
    let text = screen_text(&app);
    assert!(text.contains("Amount ▲"));
    assert!(text.contains("01/05/2024"));
    assert!(text.contains("12.50"));
    assert!(text.contains("3.00"));
}

#[test]
fn test_render_empty_range() {
    let mut app = loaded_app();
    app.set_start_date(Some(day("2025-01-01")));
    let text = screen_text(&app);
    assert!(text.contains("No expenses in selected range"));
    assert!(text.contains("Description"));
}

#[test]
fn test_render_date_prompt() {
    let mut app = loaded_app();
    app.input_mode = InputMode::StartDate;
    app.command_input = "2024-01-0".into();
    assert!(screen_text(&app).contains("Start date> 2024-01-0"));
}
