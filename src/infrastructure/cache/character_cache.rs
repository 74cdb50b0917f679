//! In-process store for the merged character list.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::domain::entities::{Character, SourceTag};
use crate::domain::sources::FetchOutcome;

/// Per-source result of the fetch that produced a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source: SourceTag,
    pub fetched: usize,
    pub outcome: FetchOutcome,
}

/// One merge result together with when and how it was produced.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub characters: Arc<Vec<Character>>,
    pub fetched_at: DateTime<Utc>,
    pub sources: Vec<SourceSummary>,
}

impl CacheSnapshot {
    pub fn new(characters: Vec<Character>, sources: Vec<SourceSummary>) -> Self {
        Self {
            characters: Arc::new(characters),
            fetched_at: Utc::now(),
            sources,
        }
    }
}

/// Lifecycle of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Empty,
    Populating,
    Populated,
}

/// Process-lifetime cache of the merged character list.
///
/// Populated lazily by the first caller and never invalidated. Population is
/// single-flight: concurrent callers that arrive while the cache is empty
/// wait for the one in-flight population and share its result instead of
/// starting their own.
///
/// When `cache_empty_results` is `false`, an empty merge result is handed to
/// the callers that waited for it but not stored, so the next caller tries
/// the upstream APIs again.
pub struct CharacterCache {
    cell: OnceCell<Arc<CacheSnapshot>>,
    flight: Mutex<()>,
    /// Bumped every time a population finishes, stored or not.
    attempts: AtomicU64,
    last_attempt: RwLock<Option<Arc<CacheSnapshot>>>,
    populating: AtomicBool,
    cache_empty_results: bool,
}

impl CharacterCache {
    pub fn new(cache_empty_results: bool) -> Self {
        Self {
            cell: OnceCell::new(),
            flight: Mutex::new(()),
            attempts: AtomicU64::new(0),
            last_attempt: RwLock::new(None),
            populating: AtomicBool::new(false),
            cache_empty_results,
        }
    }

    /// Returns the stored snapshot without triggering population.
    pub fn get(&self) -> Option<Arc<CacheSnapshot>> {
        self.cell.get().cloned()
    }

    /// Returns the result of the most recent population, even one that was
    /// not stored because it came back empty.
    pub fn last_attempt(&self) -> Option<Arc<CacheSnapshot>> {
        match self.last_attempt.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn state(&self) -> CacheState {
        if self.cell.initialized() {
            CacheState::Populated
        } else if self.populating.load(Ordering::Acquire) {
            CacheState::Populating
        } else {
            CacheState::Empty
        }
    }

    /// Returns the stored snapshot, running `populate` first if there is none.
    ///
    /// `populate` runs at most once at a time across all callers. Callers that
    /// queued behind a running population receive its result.
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Arc<CacheSnapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheSnapshot>,
    {
        if let Some(snapshot) = self.cell.get() {
            debug!("Cache HIT: {} characters", snapshot.characters.len());
            return snapshot.clone();
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let _flight = self.flight.lock().await;

        if let Some(snapshot) = self.cell.get() {
            debug!("Cache HIT after wait: {} characters", snapshot.characters.len());
            return snapshot.clone();
        }
        if self.attempts.load(Ordering::Acquire) != seen
            && let Some(snapshot) = self.last_attempt()
        {
            debug!("Sharing the uncached result of the population we waited for");
            return snapshot;
        }

        debug!("Cache MISS: populating");
        let snapshot = {
            let _populating = PopulatingGuard::start(&self.populating);
            Arc::new(populate().await)
        };

        self.record_attempt(snapshot.clone());

        if snapshot.characters.is_empty() && !self.cache_empty_results {
            warn!("Merge produced no characters; result not cached");
            return snapshot;
        }

        metrics::gauge!("characters_cached").set(snapshot.characters.len() as f64);
        info!("Cache populated with {} characters", snapshot.characters.len());
        match self.cell.set(snapshot.clone()) {
            Ok(()) => snapshot,
            Err(_) => self.cell.get().cloned().unwrap_or(snapshot),
        }
    }

    fn record_attempt(&self, snapshot: Arc<CacheSnapshot>) {
        match self.last_attempt.write() {
            Ok(mut guard) => *guard = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
        self.attempts.fetch_add(1, Ordering::AcqRel);
    }
}

/// Holds the `populating` flag up until dropped, including when the
/// populating caller is cancelled mid-fetch.
struct PopulatingGuard<'a>(&'a AtomicBool);

impl<'a> PopulatingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for PopulatingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for CharacterCache {
    fn default() -> Self {
        Self::new(false)
    }
}
