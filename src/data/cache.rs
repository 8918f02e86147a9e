//! Keyed query cache in front of a [`StatisticsSource`].
//!
//! Semantics:
//! - a payload stays fresh for a configurable window, then is refetched on demand
//! - at most one fetch per key is in flight; concurrent callers wait for it
//! - failures are returned to the caller, never cached and never retried

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::data::client::StatisticsSource;
use crate::error::AppError;

/// Freshness window used when none is configured.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(300);

/// Cache key of the dashboard statistics query.
pub const STATISTICS_KEY: &str = "admin-statistics";

#[derive(Debug, Clone)]
struct Entry {
    fetched_at: Instant,
    /// Slot generation the fetch started in.
    generation: u64,
    payload: Value,
}

/// Per-key state. Slots are never removed, so every caller of a key locks the same mutex.
#[derive(Debug, Default)]
struct Slot {
    generation: AtomicU64,
    entry: Mutex<Option<Entry>>,
}

impl Slot {
    fn is_fresh(&self, entry: &Entry, freshness: Duration) -> bool {
        entry.generation == self.generation.load(Ordering::SeqCst) && entry.fetched_at.elapsed() < freshness
    }
}

pub struct QueryCache<S> {
    source: S,
    freshness: Duration,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl<S: StatisticsSource> QueryCache<S> {
    pub fn new(source: S, freshness: Duration) -> Self {
        Self {
            source,
            freshness,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Return the cached payload for `key`, fetching it when absent or stale.
    pub fn get(&self, key: &str) -> Result<Value, AppError> {
        let slot = self.slot(key);
        // Held across the fetch: this is what keeps one request in flight per key.
        let mut entry = slot.entry.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = entry.as_ref() {
            if slot.is_fresh(cached, self.freshness) {
                tracing::debug!(key, "query cache hit");
                return Ok(cached.payload.clone());
            }
        }

        // Read before fetching: an invalidation during the fetch leaves the result stale.
        let generation = slot.generation.load(Ordering::SeqCst);
        tracing::debug!(key, "query cache miss, fetching");
        let payload = self.source.fetch_statistics()?;
        *entry = Some(Entry {
            fetched_at: Instant::now(),
            generation,
            payload: payload.clone(),
        });
        Ok(payload)
    }

    /// Whether `key` holds a payload inside its freshness window.
    pub fn is_fresh(&self, key: &str) -> bool {
        let Some(slot) = self.existing_slot(key) else {
            return false;
        };
        let entry = slot.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry.as_ref().is_some_and(|e| slot.is_fresh(e, self.freshness))
    }

    /// Mark the cached payload stale so the next `get` refetches.
    ///
    /// Does not wait for a fetch in flight; that fetch's result is stale on arrival.
    pub fn invalidate(&self, key: &str) {
        if let Some(slot) = self.existing_slot(key) {
            slot.generation.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(key, "query cache entry invalidated");
        }
    }

    fn slot(&self, key: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.to_string()).or_default().clone()
    }

    fn existing_slot(&self, key: &str) -> Option<Arc<Slot>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).cloned()
    }
}
