use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "expense-view.log";

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
pub(crate) enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Initializes the tracing subscriber.
pub(crate) fn init_logger(level: LevelFilter, target: LogTarget<'_>) -> Result<()> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(default_directive(level)),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|e| anyhow!("Failed to install logger: {e}"))
}

/// Filter directive used when `RUST_LOG` is unset: only this crate, at `level`.
fn default_directive(level: LevelFilter) -> String {
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Log file location inside the platform data directory, created on demand.
pub(crate) fn log_file_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expense-view", "ExpenseView")
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(LOG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_directive_is_crate_scoped() {
        assert_eq!(
            default_directive(LevelFilter::DEBUG).to_lowercase(),
            "expense_view=debug"
        );
        assert_eq!(
            default_directive(LevelFilter::WARN).to_lowercase(),
            "expense_view=warn"
        );
    }

    #[test]
    fn test_default_directive_parses_as_filter() {
        assert!(EnvFilter::try_new(default_directive(LevelFilter::INFO)).is_ok());
    }
}
