//! Shared holder for the current quote snapshot.

use super::{Quote, QuoteSnapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Lock-guarded current snapshot, shared between fetch tasks and the UI loop.
///
/// Readers get an `Arc` copy and never hold the lock while drawing. Writers
/// replace the whole snapshot, so a reader sees either the old or the new
/// set of quotes. Overlapping fetch cycles are not ordered: the last
/// `publish` wins.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<QuoteSnapshot>>>,
    generation: Arc<AtomicU64>,
}

impl SnapshotStore {
    /// Create a store holding the empty snapshot.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(QuoteSnapshot::empty()))),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a copy of the current snapshot.
    pub async fn current(&self) -> Arc<QuoteSnapshot> {
        self.current.read().await.clone()
    }

    /// Replace the current snapshot with the result of fetch cycle `cycle`.
    ///
    /// Returns the publish generation (1 for the first publish).
    pub async fn publish(&self, cycle: u64, quotes: Vec<Quote>) -> u64 {
        let snapshot = Arc::new(QuoteSnapshot::new(cycle, quotes));
        let mut guard = self.current.write().await;
        *guard = snapshot;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of snapshots published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
