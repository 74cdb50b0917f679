//! Domain layer containing the gallery data model and merge logic.
//!
//! The domain layer has no dependencies on HTTP, templates or the upstream
//! APIs. It defines what a character is, the contract every upstream source
//! fulfils, and the pure function that merges two sources.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`sources`] - Source trait definitions
//! - [`merge`] - Deduplication and id assignment
//! - [`query`] - Lookup, search and navigation over a merged list
//!
//! # Pipeline
//!
//! 1. [`crate::application::services::CharacterService`] receives a request
//! 2. On a cache miss both [`sources::CharacterSource`]s are fetched concurrently
//! 3. [`merge::merge`] deduplicates and numbers the results
//! 4. The list is stored in [`crate::infrastructure::cache::CharacterCache`]

pub mod entities;
pub mod merge;
pub mod query;
pub mod sources;
