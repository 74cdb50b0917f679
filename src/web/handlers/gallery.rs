//! Gallery home page handler.

use axum::{extract::State, response::IntoResponse};

use super::page::IndexTemplate;
use crate::state::AppState;

/// Renders the gallery of every merged character.
///
/// # Endpoint
///
/// `GET /`
///
/// The first request after startup waits for both upstream APIs unless the
/// cache was preloaded.
pub async fn gallery_handler(State(state): State<AppState>) -> impl IntoResponse {
    let characters = state.character_service.get_merged_characters().await;
    let total = characters.len();

    IndexTemplate::gallery(characters.as_ref().clone(), total, None)
}
