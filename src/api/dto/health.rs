//! DTOs for the health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::infrastructure::cache::{CacheState, SourceSummary};

/// Health check response with cache status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheHealth,
}

/// What the character cache currently holds.
#[derive(Debug, Serialize)]
pub struct CacheHealth {
    pub state: CacheState,
    pub characters: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,

    pub sources: Vec<SourceSummary>,
}
