//! Source trait for upstream character APIs.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{Character, SourceTag};

/// How a fetch from one upstream API ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The source was read to its end.
    Complete,
    /// Some records were collected before the fetch stopped early.
    Truncated { reason: String },
    /// Nothing usable was collected.
    Failed { reason: String },
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Characters produced by a single source together with the fetch outcome.
///
/// Lets callers tell "the source has zero characters" (`Complete` with an
/// empty list) from "the source could not be reached" (`Failed`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBatch {
    pub source: SourceTag,
    pub characters: Vec<Character>,
    pub outcome: FetchOutcome,
}

impl SourceBatch {
    pub fn complete(source: SourceTag, characters: Vec<Character>) -> Self {
        Self {
            source,
            characters,
            outcome: FetchOutcome::Complete,
        }
    }

    pub fn truncated(
        source: SourceTag,
        characters: Vec<Character>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source,
            characters,
            outcome: FetchOutcome::Truncated {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(source: SourceTag, reason: impl Into<String>) -> Self {
        Self {
            source,
            characters: Vec::new(),
            outcome: FetchOutcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// An upstream API that yields characters in the canonical shape.
///
/// Implementations never return errors: transport and decoding failures are
/// logged and reported through [`SourceBatch::outcome`], so a single
/// unreachable API only shrinks the gallery.
///
/// # Implementations
///
/// - [`crate::infrastructure::sources::ThronesApiSource`] - single-shot ThronesAPI
/// - [`crate::infrastructure::sources::IceAndFireSource`] - paginated Ice and Fire API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetches every character the source currently offers.
    async fn fetch(&self) -> SourceBatch;
}
