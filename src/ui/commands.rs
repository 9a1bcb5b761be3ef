use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, ViewState};
use crate::table::{parse_bound, DateRange, SortDirection, SortField};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!(
        "sort",
        "Sort by column (e.g. :sort amount desc)",
        cmd_sort,
        r
    );
    register_command!("s", "Sort by column (e.g. :s amount)", cmd_sort, r);
    register_command!(
        "from",
        "Set start date (e.g. :from 2024-01-06, empty clears)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Set end date (e.g. :to 2024-01-12, empty clears)",
        cmd_to,
        r
    );
    register_command!(
        "range",
        "Set both dates (e.g. :range 2024-01-06 2024-01-12)",
        cmd_range,
        r
    );
    register_command!("clear", "Clear the date range", cmd_clear, r);
    register_command!("reload", "Fetch the expenses again", cmd_reload, r);
    register_command!("r", "Fetch the expenses again", cmd_reload, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

/// Parse and run one command line (without the leading `:`).
pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    let (name, args) = match input.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (input, ""),
    };

    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args, app),
        None => {
            app.set_status(format!("Unknown command: {name}"));
            Ok(())
        }
    }
}

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let (column, direction) = match parts.as_slice() {
        [column] => (*column, None),
        [column, direction] => (*column, Some(*direction)),
        _ => {
            app.set_status("Usage: :sort <date|description|amount|type|category> [asc|desc]");
            return Ok(());
        }
    };
    let field: SortField = match column.parse() {
        Ok(field) => field,
        Err(e) => {
            app.set_status(e);
            return Ok(());
        }
    };
    let requested = match direction.map(str::parse::<SortDirection>) {
        None => None,
        Some(Ok(direction)) => Some(direction),
        Some(Err(e)) => {
            app.set_status(e);
            return Ok(());
        }
    };

    if app.view_state() != ViewState::Ready {
        app.set_status("Nothing to sort");
        return Ok(());
    }
    app.sort_by(field, requested);
    Ok(())
}

fn cmd_from(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_start_date(None);
        return Ok(());
    }
    match parse_bound(args, app.today) {
        Some(date) => app.set_start_date(Some(date)),
        None => app.set_status(format!("Invalid date: {args}")),
    }
    Ok(())
}

fn cmd_to(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_end_date(None);
        return Ok(());
    }
    match parse_bound(args, app.today) {
        Some(date) => app.set_end_date(Some(date)),
        None => app.set_status(format!("Invalid date: {args}")),
    }
    Ok(())
}

fn cmd_range(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [from, to] = parts.as_slice() else {
        app.set_status("Usage: :range <from> <to>");
        return Ok(());
    };
    match (parse_bound(from, app.today), parse_bound(to, app.today)) {
        (Some(start), Some(end)) => app.set_range(DateRange::new(Some(start), Some(end))),
        (None, _) => app.set_status(format!("Invalid date: {from}")),
        (_, None) => app.set_status(format!("Invalid date: {to}")),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.set_range(DateRange::default());
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reload_requested = true;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
