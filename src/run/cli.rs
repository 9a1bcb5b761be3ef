use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::api::{self, ExpenseSource};
use crate::args::ListArgs;
use crate::models::ExpenseRecord;
use crate::table::{filter, sort, SortDirection};
use crate::ui::util::{format_amount, format_date, truncate};

const COLUMNS: [&str; 5] = ["Date", "Description", "Amount", "ExpenseType", "Category"];

/// Non-interactive view: one load, optional sort, range filter, printed to stdout.
pub(crate) async fn as_cli(args: &ListArgs, source: &dyn ExpenseSource) -> Result<()> {
    let expenses = api::load_expenses(source).await;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, expenses, args)
}

fn write_listing(
    out: &mut impl Write,
    expenses: Vec<ExpenseRecord>,
    args: &ListArgs,
) -> Result<()> {
    if expenses.is_empty() {
        writeln!(out, "No data available")?;
        return Ok(());
    }

    let expenses = match args.sort() {
        Some(field) => sort(
            expenses,
            field,
            args.direction().unwrap_or(SortDirection::Ascending),
        ),
        None => expenses,
    };
    let visible = filter(&expenses, args.from_date(), args.to_date());

    if args.csv() {
        write_csv(out, &visible)
    } else {
        write_table(out, &visible)
    }
}

fn write_csv(out: &mut impl Write, expenses: &[&ExpenseRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "ID",
        "TransactionDate",
        "Description",
        "Amount",
        "ExpenseType",
        "Category",
    ])?;
    for e in expenses {
        wtr.write_record([
            e.id.to_string(),
            e.transaction_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.description.clone(),
            format_amount(e.amount).replace(',', ""),
            e.expense_type.clone(),
            e.category.clone(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV")?;
    Ok(())
}

fn write_table(out: &mut impl Write, expenses: &[&ExpenseRecord]) -> Result<()> {
    writeln!(
        out,
        "{:<10}  {:<32}  {:>12}  {:<14}  {:<16}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
    )?;
    writeln!(out, "{}", "-".repeat(10 + 32 + 12 + 14 + 16 + 8))?;
    for e in expenses {
        writeln!(
            out,
            "{:<10}  {:<32}  {:>12}  {:<14}  {:<16}",
            format_date(e.transaction_date),
            truncate(&e.description, 32),
            format_amount(e.amount),
            truncate(&e.expense_type, 14),
            truncate(&e.category, 16),
        )?;
    }
    if expenses.is_empty() {
        writeln!(out, "No expenses in selected range")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
