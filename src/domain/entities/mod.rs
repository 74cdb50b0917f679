//! Core domain entities representing the gallery data model.
//!
//! # Entity Types
//!
//! - [`Character`] - A merged character entry
//! - [`SourceTag`] - Which upstream API produced a record
//!
//! Fallback values shared by both source adapters live here as constants so
//! the adapters and the templates agree on them.

pub mod character;

pub use character::{
    Character, NO_TITLE, NOT_AVAILABLE, SEE_ALLEGIANCES, SourceTag, UNKNOWN, non_blank,
    normalize_name, split_name,
};
