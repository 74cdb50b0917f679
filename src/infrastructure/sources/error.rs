//! Error types for upstream API access.

/// Errors raised while talking to an upstream character API.
///
/// These never leave the adapter: [`crate::domain::sources::CharacterSource`]
/// implementations log them and fold them into a
/// [`crate::domain::sources::FetchOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// True when the request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

/// Result type for upstream operations.
pub type SourceResult<T> = Result<T, SourceError>;
