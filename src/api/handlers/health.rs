//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CacheHealth, HealthResponse};
use crate::infrastructure::cache::CacheState;
use crate::state::AppState;

/// Returns service health with the state of the character cache.
///
/// # Endpoint
///
/// `GET /health`
///
/// Never triggers a fetch: it only reports what the cache holds.
///
/// # Response Codes
///
/// - **200 OK**: cache not populated yet, or populated with every source complete
/// - **503 Service Unavailable**: the last fetch had a failed or truncated
///   source, or came back empty and was not cached
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "cache": {
///     "state": "populated",
///     "characters": 2134,
///     "fetched_at": "2024-01-15T10:30:00Z",
///     "sources": [
///       { "source": "A", "fetched": 53, "outcome": { "status": "complete" } },
///       { "source": "B", "fetched": 2081, "outcome": { "status": "complete" } }
///     ]
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache = state.character_service.cache();
    let cache_state = cache.state();

    // An empty merge that was not stored still tells which sources failed.
    let snapshot = cache.get().or_else(|| cache.last_attempt());

    let cache_health = match &snapshot {
        Some(snapshot) => CacheHealth {
            state: cache_state,
            characters: snapshot.characters.len(),
            fetched_at: Some(snapshot.fetched_at),
            sources: snapshot.sources.clone(),
        },
        None => CacheHealth {
            state: cache_state,
            characters: 0,
            fetched_at: None,
            sources: Vec::new(),
        },
    };

    let all_complete = cache_health
        .sources
        .iter()
        .all(|s| s.outcome.is_complete());

    let status = match cache_state {
        CacheState::Populated if all_complete => "healthy",
        CacheState::Populated => "degraded",
        CacheState::Empty if snapshot.is_some() && !all_complete => "degraded",
        CacheState::Empty if snapshot.is_some() => "healthy",
        CacheState::Empty | CacheState::Populating => "starting",
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: cache_health,
    };

    if status == "degraded" {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    } else {
        Ok(Json(response))
    }
}
