//! Loader for the remote expense collection.
//!
//! One `GET {base}/expenses` per view activation. Failures are logged and collapse to an
//! empty collection; the view never shows a separate error state.

use anyhow::Context;
use tracing::{error, info, warn};
use url::Url;

use crate::config::Config;
use crate::models::ExpenseRecord;

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("response body is not an expense list: {0}")]
    Body(#[from] serde_json::Error),
}

/// Anything that can produce the expense collection.
#[async_trait::async_trait]
pub(crate) trait ExpenseSource: Send + Sync {
    async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, LoadError>;

    /// Where the expenses come from, for log lines.
    fn location(&self) -> String;
}

pub(crate) struct HttpExpenseSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpExpenseSource {
    pub(crate) fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            url: config.expenses_url().clone(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl ExpenseSource for HttpExpenseSource {
    async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, LoadError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }
        let body = response.bytes().await?;
        decode_expenses(&body)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}

/// Decode a response body into records.
///
/// The body must be a JSON array. Elements that do not decode are skipped with a warning
/// so they never reach sorting or filtering.
pub(crate) fn decode_expenses(body: &[u8]) -> Result<Vec<ExpenseRecord>, LoadError> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let total = items.len();
    let mut expenses = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        match ExpenseRecord::from_json(item) {
            Ok(expense) => expenses.push(expense),
            Err(e) => warn!(index, "Skipping malformed expense record: {e}"),
        }
    }

    if expenses.len() < total {
        warn!(
            "Skipped {} of {total} expense records",
            total - expenses.len()
        );
    }
    Ok(expenses)
}

/// Run one load cycle. Any failure is logged and yields an empty collection.
pub(crate) async fn load_expenses(source: &dyn ExpenseSource) -> Vec<ExpenseRecord> {
    let location = source.location();
    info!("Fetching expenses from {location}");
    match source.fetch_expenses().await {
        Ok(expenses) => {
            info!("Fetched {} expenses", expenses.len());
            expenses
        }
        Err(e) => {
            error!("Error fetching expenses from {location}: {e}");
            Vec::new()
        }
    }
}
