mod api;
mod args;
mod config;
mod logging;
mod models;
mod run;
mod table;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::debug;

use api::HttpExpenseSource;
use args::{Args, Command};
use config::Config;
use logging::LogTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_base_url(args.api_url())?;

    match args.command() {
        None | Some(Command::Tui) => {
            let log_path = logging::log_file_path()?;
            logging::init_logger(args.log_level(), LogTarget::File(&log_path))?;
            debug!("Expenses endpoint: {}", config.expenses_url());
            let source = HttpExpenseSource::new(&config)?;
            run::as_tui(Arc::new(source))
        }
        Some(Command::List(list)) => {
            logging::init_logger(args.log_level(), LogTarget::Stderr)?;
            debug!("Expenses endpoint: {}", config.expenses_url());
            let source = HttpExpenseSource::new(&config)?;
            run::as_cli(list, &source).await
        }
    }
}
