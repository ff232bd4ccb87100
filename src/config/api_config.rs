//! Backend API configuration parsing from environment variables.

use super::parse_var;
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";

/// Forecasting backend endpoints and HTTP timeouts
#[derive(Debug, Clone)]
pub struct ApiEnvConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ApiEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("LOADCAST_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = normalize_base_url(&raw_url)?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(parse_var(lookup, "HTTP_TIMEOUT_SECS", 30)?),
            connect_timeout: Duration::from_secs(parse_var(
                lookup,
                "HTTP_CONNECT_TIMEOUT_SECS",
                10,
            )?),
        })
    }

    /// Resolves an endpoint path such as `live-weather` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Cannot build endpoint URL for '{}'", path))
    }
}

// Url::join only keeps the last path segment when the base ends with '/'
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw.trim()).with_context(|| format!("Invalid LOADCAST_API_URL: '{}'", raw))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
