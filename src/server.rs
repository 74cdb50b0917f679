//! HTTP server initialization and runtime setup.
//!
//! Builds the shared HTTP client, wires the sources, cache and service
//! together, and runs the Axum server until Ctrl-C.

use crate::application::services::CharacterService;
use crate::config::Config;
use crate::infrastructure::cache::CharacterCache;
use crate::infrastructure::sources::{IceAndFireSource, ThronesApiSource};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// User agent sent to both upstream APIs.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by both upstream adapters.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()
        .context("Failed to build HTTP client")
}

/// Wires both sources and a fresh cache into a [`CharacterService`].
///
/// ThronesAPI is the primary source: its records win name collisions.
///
/// # Errors
///
/// Returns an error if an endpoint URL is invalid or the HTTP client cannot
/// be built.
pub fn build_character_service(config: &Config) -> Result<Arc<CharacterService>> {
    let client = build_http_client(config)?;

    let thrones = ThronesApiSource::new(client.clone(), config.thrones_api_endpoint()?);
    let ice_and_fire = IceAndFireSource::new(client, config.ice_and_fire_api_endpoint()?)
        .with_page_size(config.ice_and_fire_page_size)
        .with_max_pages(config.ice_and_fire_max_pages);

    let cache = Arc::new(CharacterCache::new(config.cache_empty_results));

    Ok(Arc::new(CharacterService::new(
        Arc::new(thrones),
        Arc::new(ice_and_fire),
        cache,
    )))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Upstream sources and the character cache
/// - Background cache preload (unless `PRELOAD=false`)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be turned into sources
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let service = build_character_service(&config)?;
    let state = AppState::new(service.clone());

    let app = app_router(
        state,
        RouterOptions {
            static_dir: PathBuf::from(&config.static_dir),
            rate_limit: config.rate_limit_enabled,
        },
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    if config.preload {
        tokio::spawn(async move {
            tracing::info!("Preloading character cache");
            let characters = service.get_merged_characters().await;
            tracing::info!("Preload finished with {} characters", characters.len());
        });
    }

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
