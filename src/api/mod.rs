//! Quote provider integration.
//!
//! This module talks to the chart API, converts its responses into
//! [`Quote`](crate::state::Quote)s and runs retried fetch cycles.

mod client;
mod converter;
mod fetcher;

pub use client::{CHART_BASE_URL, ChartClient, QuoteSource, REQUEST_TIMEOUT_SECS};
pub use converter::DataConverter;
pub use fetcher::{CycleOutcome, FetchPolicy, QuoteFetcher};
