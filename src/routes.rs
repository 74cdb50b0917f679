//! Top-level router combining pages, JSON API and assets.
//!
//! # Route Structure
//!
//! - `GET  /`                 - Gallery page
//! - `GET  /character/{id}`   - Character detail page
//! - `GET  /search/{name}`    - Search results page
//! - `GET  /search?q=`        - Search form fallback
//! - `GET  /health`           - Cache state and per-source outcome
//! - `/api/*`                 - JSON API
//! - `/static/*`              - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (optional)
//! - **Path normalization** - Trailing slash handling

use std::path::PathBuf;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Options that shape the router but not the handlers.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Enables per-IP rate limiting. Requires the server to provide
    /// `ConnectInfo<SocketAddr>`, so tests leave it off.
    pub rate_limit: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            rate_limit: false,
        }
    }
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, options))
}

/// Routes and middleware without trailing slash normalization.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        .merge(web::routes::routes())
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .nest_service("/static", ServeDir::new(options.static_dir))
        .with_state(state);

    if options.rate_limit {
        router = router.layer(rate_limit::layer());
    }

    router.layer(tracing::layer())
}
