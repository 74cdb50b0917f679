//! Source trait definitions for the domain layer.
//!
//! Concrete HTTP implementations live in `crate::infrastructure::sources`;
//! mocks are generated via `mockall` for unit tests.

pub mod character_source;

pub use character_source::{CharacterSource, FetchOutcome, SourceBatch};

#[cfg(test)]
pub use character_source::MockCharacterSource;
