use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info};

use crate::api::{self, ExpenseSource};
use crate::models::ExpenseRecord;
use crate::table::{parse_bound, DateRange, SortField};
use crate::ui::app::{App, InputMode, LoadState, ViewState};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) fn as_tui(source: Arc<dyn ExpenseSource>) -> Result<()> {
    let mut app = App::new(Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, source);

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
    source: Arc<dyn ExpenseSource>,
) -> Result<()> {
    // At most one load is in flight, so one slot is enough.
    let (tx, mut rx) = mpsc::channel(1);
    spawn_load(app, &source, &tx);

    while app.running {
        terminal.draw(|f| {
            // 1 title + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        receive_load(app, &mut rx);

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app)?;
            }
        }

        if app.reload_requested {
            app.reload_requested = false;
            if app.load_state == LoadState::Loading {
                app.set_status("Already loading");
            } else {
                spawn_load(app, &source, &tx);
            }
        }
    }
    Ok(())
}

/// Start one load cycle as a background task. The result comes back through `tx`.
///
/// Must be called from within the tokio runtime.
fn spawn_load(app: &mut App, source: &Arc<dyn ExpenseSource>, tx: &Sender<Vec<ExpenseRecord>>) {
    app.begin_load();
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let expenses = api::load_expenses(source.as_ref()).await;
        // The receiver is gone if the user quit while loading.
        let _ = tx.send(expenses).await;
    });
}

fn receive_load(app: &mut App, rx: &mut Receiver<Vec<ExpenseRecord>>) {
    if let Ok(expenses) = rx.try_recv() {
        info!("Load complete with {} expenses", expenses.len());
        app.finish_load(expenses);
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_key(key: KeyEvent, app: &mut App) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app),
        InputMode::Command => handle_command_input(key, app)?,
        InputMode::StartDate | InputMode::EndDate => handle_date_input(key, app),
    }
    Ok(())
}

fn handle_normal_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                scroll_up(&mut app.row_index, &mut app.row_scroll);
            }
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(&field) = SortField::all().get(index) {
                sort_column(app, field);
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.header_index = app.header_index.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.header_index + 1 < SortField::all().len() {
                app.header_index += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char('s') => {
            let field = app.header_field();
            sort_column(app, field);
        }
        KeyCode::Char('j') | KeyCode::Down => move_down(app),
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut app.row_index, &mut app.row_scroll),
        KeyCode::Char('g') => scroll_to_top(&mut app.row_index, &mut app.row_scroll),
        KeyCode::Char('G') => {
            let len = app.visible_expenses().len();
            scroll_to_bottom(&mut app.row_index, &mut app.row_scroll, len, app.visible_rows);
        }
        KeyCode::Char('f') => begin_date_edit(app, InputMode::StartDate),
        KeyCode::Char('t') => begin_date_edit(app, InputMode::EndDate),
        KeyCode::Char('x') => app.set_range(DateRange::default()),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_date_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            let editing = app.input_mode;
            app.input_mode = InputMode::Normal;

            let bound = if input.trim().is_empty() {
                None
            } else {
                match parse_bound(&input, app.today) {
                    Some(date) => Some(date),
                    None => {
                        app.set_status(format!("Invalid date: {input}"));
                        return;
                    }
                }
            };
            if editing == InputMode::StartDate {
                app.set_start_date(bound);
            } else {
                app.set_end_date(bound);
            }
        }
        KeyCode::Esc => {
            // Dismissing the editor keeps the previous bound.
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn sort_column(app: &mut App, field: SortField) {
    if app.view_state() == ViewState::Ready {
        app.sort_by(field, None);
    } else {
        debug!("Ignoring sort by {field} while there is nothing to sort");
    }
}

fn move_down(app: &mut App) {
    let len = app.visible_expenses().len();
    scroll_down(&mut app.row_index, &mut app.row_scroll, len, app.visible_rows);
}

/// Open the bound editor, pre-filled with the current bound or today.
fn begin_date_edit(app: &mut App, mode: InputMode) {
    let current = match mode {
        InputMode::StartDate => app.range.start,
        _ => app.range.end,
    };
    app.command_input = current.unwrap_or(app.today).format("%Y-%m-%d").to_string();
    app.input_mode = mode;
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
