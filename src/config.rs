use anyhow::{bail, Context, Result};
use url::Url;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:3001";
const EXPENSES_PATH: &str = "expenses";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    expenses_url: Url,
}

impl Config {
    /// Build the configuration from the endpoint base URL.
    ///
    /// The fixed `expenses` resource is appended to whatever path the base carries, so
    /// `http://host/api` and `http://host/api/` both resolve to `http://host/api/expenses`.
    pub(crate) fn from_base_url(base: &str) -> Result<Self> {
        let mut url = Url::parse(base.trim())
            .with_context(|| format!("Invalid API base URL: {base}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("API base URL must be http or https: {base}");
        }
        if url.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {base}");
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        let expenses_url = url
            .join(EXPENSES_PATH)
            .with_context(|| format!("Failed to build expenses URL from {base}"))?;
        Ok(Self { expenses_url })
    }

    pub(crate) fn expenses_url(&self) -> &Url {
        &self.expenses_url
    }
}
