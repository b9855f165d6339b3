//! Chart API client.

use super::DataConverter;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Chart endpoint; the symbol is appended as the last path segment.
pub const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Per-request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

/// A source of daily closes for a symbol.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the recent daily adjusted closes, oldest first. Nulls are kept.
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<Option<f64>>>;
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json,text/plain,*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

/// HTTP client for the chart endpoint.
#[derive(Debug, Clone)]
pub struct ChartClient {
    client: Client,
    base_url: String,
}

impl ChartClient {
    /// Create a client for the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(CHART_BASE_URL)
    }

    /// Create a client for a different chart endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL for a symbol's chart, without the query string.
    pub fn chart_url(&self, symbol: &str) -> String {
        format!("{}/{}", self.base_url, symbol)
    }
}

#[async_trait]
impl QuoteSource for ChartClient {
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<Option<f64>>> {
        let response = self
            .client
            .get(self.chart_url(symbol))
            .query(&[("range", "5d"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        DataConverter::parse_closes(symbol, &body)
    }
}
