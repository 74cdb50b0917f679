//! Query facade over the fetch, merge and cache pipeline.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::Character;
use crate::domain::merge::merge;
use crate::domain::query;
pub use crate::domain::query::Direction;
use crate::domain::sources::{CharacterSource, SourceBatch};
use crate::infrastructure::cache::{CacheSnapshot, CharacterCache, SourceSummary};

/// Service returning the merged character list and queries over it.
///
/// Owns the two upstream sources and the injected [`CharacterCache`]. The
/// first call fetches both sources concurrently, merges them with ThronesAPI
/// taking priority, and stores the result; later calls are served from the
/// cache. None of the methods fail: an unreachable upstream only shrinks the
/// list.
pub struct CharacterService {
    primary: Arc<dyn CharacterSource>,
    secondary: Arc<dyn CharacterSource>,
    cache: Arc<CharacterCache>,
}

impl CharacterService {
    /// Creates a new character service.
    ///
    /// Records from `primary` win over records from `secondary` that share a
    /// normalized full name.
    pub fn new(
        primary: Arc<dyn CharacterSource>,
        secondary: Arc<dyn CharacterSource>,
        cache: Arc<CharacterCache>,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
        }
    }

    /// Returns the merged, id-assigned character list.
    ///
    /// Empty when both upstream APIs are unavailable or empty.
    pub async fn get_merged_characters(&self) -> Arc<Vec<Character>> {
        self.snapshot().await.characters.clone()
    }

    /// Returns the cached snapshot, populating it first if needed.
    pub async fn snapshot(&self) -> Arc<CacheSnapshot> {
        self.cache.get_or_populate(|| self.fetch_and_merge()).await
    }

    /// Access to the cache for health reporting.
    pub fn cache(&self) -> &CharacterCache {
        &self.cache
    }

    /// Finds a character by its merged id.
    pub async fn find_by_id(&self, id: u32) -> Option<Character> {
        query::find_by_id(&self.get_merged_characters().await, id).cloned()
    }

    /// Case-insensitive substring search over full names.
    ///
    /// A blank term matches nothing.
    pub async fn search(&self, term: &str) -> Vec<Character> {
        query::search(&self.get_merged_characters().await, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the neighbour of `current_id`, wrapping around at both ends.
    ///
    /// `None` when `current_id` is not in the list.
    pub async fn navigate(&self, current_id: u32, direction: Direction) -> Option<Character> {
        query::neighbour(&self.get_merged_characters().await, current_id, direction).cloned()
    }

    async fn fetch_and_merge(&self) -> CacheSnapshot {
        info!("Fetching characters from both APIs...");

        let (primary, secondary) = tokio::join!(self.primary.fetch(), self.secondary.fetch());

        let sources = vec![summarize(&primary), summarize(&secondary)];
        let merged = merge(primary.characters, secondary.characters);

        info!(
            primary = sources[0].fetched,
            secondary = sources[1].fetched,
            total = merged.len(),
            "Merged characters"
        );

        CacheSnapshot::new(merged, sources)
    }
}

fn summarize(batch: &SourceBatch) -> SourceSummary {
    SourceSummary {
        source: batch.source,
        fetched: batch.characters.len(),
        outcome: batch.outcome.clone(),
    }
}
