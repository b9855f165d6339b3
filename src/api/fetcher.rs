//! Quote fetching with cycle-level retries.

use super::QuoteSource;
use super::converter::DataConverter;
use crate::error::{Error, Result};
use crate::state::{Quote, SnapshotStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Timing of a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Attempts per cycle, including the first.
    pub max_attempts: u32,
    /// Wait between failed attempts.
    pub retry_delay: Duration,
    /// Wait between consecutive symbol requests.
    pub symbol_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(30),
            symbol_delay: Duration::from_millis(500),
        }
    }
}

/// How a fetch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new snapshot was published.
    Updated {
        cycle: u64,
        quotes: usize,
        attempts: u32,
    },
    /// Every attempt failed; the previous snapshot is still current.
    Failed { cycle: u64, attempts: u32 },
}

impl CycleOutcome {
    /// Number of attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Updated { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// Number of retry delays waited.
    pub fn retry_waits(&self) -> u32 {
        self.attempts().saturating_sub(1)
    }

    /// Check if a snapshot was published.
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Fetches quotes for a symbol list and publishes them to a [`SnapshotStore`].
///
/// Cheap to clone; clones share the source, store and cycle counter.
#[derive(Clone)]
pub struct QuoteFetcher {
    source: Arc<dyn QuoteSource>,
    store: SnapshotStore,
    policy: FetchPolicy,
    next_cycle: Arc<AtomicU64>,
}

impl QuoteFetcher {
    /// Create a fetcher with the default policy.
    pub fn new(source: Arc<dyn QuoteSource>, store: SnapshotStore) -> Self {
        Self::with_policy(source, store, FetchPolicy::default())
    }

    /// Create a fetcher with a custom policy.
    pub fn with_policy(
        source: Arc<dyn QuoteSource>,
        store: SnapshotStore,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            source,
            store,
            policy,
            next_cycle: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The store this fetcher publishes to.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Fetch every symbol once, in order.
    ///
    /// Symbols with fewer than two closes are skipped. Any error (including
    /// a rate limit on a single symbol) aborts the whole batch.
    pub async fn fetch_all(&self, symbols: &[String]) -> Result<Vec<Quote>> {
        let mut quotes = Vec::with_capacity(symbols.len());

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 && !self.policy.symbol_delay.is_zero() {
                tokio::time::sleep(self.policy.symbol_delay).await;
            }

            let closes = self.source.daily_closes(symbol).await?;
            match DataConverter::convert_quote(symbol, &closes) {
                Some(quote) => quotes.push(quote),
                None => tracing::debug!("{}: fewer than two closes, skipping", symbol),
            }
        }

        Ok(quotes)
    }

    /// Run one full fetch cycle with retries and publish the result.
    ///
    /// Never fails: on exhaustion the current snapshot is left untouched.
    pub async fn refresh(&self, symbols: &[String]) -> CycleOutcome {
        let cycle = self.next_cycle.fetch_add(1, Ordering::SeqCst);
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let failure = match self.fetch_all(symbols).await {
                Ok(quotes) if !quotes.is_empty() => {
                    let count = quotes.len();
                    self.store.publish(cycle, quotes).await;
                    tracing::info!("fetched {} quotes (cycle {})", count, cycle);
                    return CycleOutcome::Updated {
                        cycle,
                        quotes: count,
                        attempts: attempt,
                    };
                }
                Ok(_) => Error::application("no symbol returned enough closes"),
                Err(e) => e,
            };

            if failure.is_rate_limited() {
                tracing::warn!(
                    "attempt {}/{}: {}, backing off {:?}",
                    attempt,
                    max_attempts,
                    failure,
                    self.policy.retry_delay
                );
            } else {
                tracing::warn!("attempt {}/{}: {}", attempt, max_attempts, failure);
            }
            if attempt < max_attempts {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }

        tracing::error!("all attempts failed, keeping cached data");
        CycleOutcome::Failed {
            cycle,
            attempts: max_attempts,
        }
    }

    /// Run [`refresh`](Self::refresh) on its own task.
    pub fn spawn_refresh(&self, symbols: Vec<String>) -> JoinHandle<CycleOutcome> {
        let fetcher = self.clone();
        tokio::spawn(async move { fetcher.refresh(&symbols).await })
    }
}
