//! Caching layer for the merged character list.
//!
//! Provides [`CharacterCache`], an in-process, populate-once store owned by
//! the composition root and injected into
//! [`crate::application::services::CharacterService`].

mod character_cache;

pub use character_cache::{CacheSnapshot, CacheState, CharacterCache, SourceSummary};
