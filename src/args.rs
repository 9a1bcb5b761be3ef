//! Command-line interface for `expense-view`.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::config::DEFAULT_API_URL;
use crate::table::{parse_bound, SortDirection, SortField};

/// expense-view: browse remote expense records in a sortable, date-filterable table.
///
/// Without a subcommand the interactive table is launched. Expenses are fetched once from
/// `<api-url>/expenses`.
#[derive(Debug, Parser)]
#[command(name = "expense-view", version)]
pub(crate) struct Args {
    /// Base URL of the expense service.
    #[arg(long, env = "EXPENSE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(long, default_value_t = LevelFilter::INFO, global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    pub(crate) fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub(crate) fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Launch the interactive table (the default).
    Tui,
    /// Fetch once and print the table to stdout.
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListArgs {
    /// Column to sort by: date, description, amount, type or category.
    #[arg(long)]
    sort: Option<SortField>,

    /// Sort descending.
    #[arg(long, requires = "sort", conflicts_with = "asc")]
    desc: bool,

    /// Sort ascending (the default).
    #[arg(long, requires = "sort")]
    asc: bool,

    /// First day to include (YYYY-MM-DD, MM/DD/YYYY or "today").
    #[arg(long, value_parser = parse_bound_arg)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, MM/DD/YYYY or "today").
    #[arg(long, value_parser = parse_bound_arg)]
    to: Option<NaiveDate>,

    /// Write CSV instead of an aligned table.
    #[arg(long)]
    csv: bool,
}

impl ListArgs {
    pub(crate) fn sort(&self) -> Option<SortField> {
        self.sort
    }

    pub(crate) fn direction(&self) -> Option<SortDirection> {
        if self.desc {
            Some(SortDirection::Descending)
        } else if self.asc {
            Some(SortDirection::Ascending)
        } else {
            None
        }
    }

    pub(crate) fn from_date(&self) -> Option<NaiveDate> {
        self.from
    }

    pub(crate) fn to_date(&self) -> Option<NaiveDate> {
        self.to
    }

    pub(crate) fn csv(&self) -> bool {
        self.csv
    }
}

fn parse_bound_arg(s: &str) -> Result<NaiveDate, String> {
    parse_bound(s, Local::now().date_naive()).ok_or_else(|| format!("invalid date '{s}'"))
}
