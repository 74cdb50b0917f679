//! JSON API route configuration.
//!
//! All endpoints are public and read-only.

use crate::api::handlers::{
    character_count_handler, character_handler, character_list_handler, navigate_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /characters`                                   - Whole merged list
/// - `GET /characters/count`                             - Number of characters
/// - `GET /characters/{id}`                              - One character by id
/// - `GET /character/navigate/{direction}/{current_id}`  - Neighbour of a character
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/characters", get(character_list_handler))
        .route("/characters/count", get(character_count_handler))
        .route("/characters/{id}", get(character_handler))
        .route(
            "/character/navigate/{direction}/{current_id}",
            get(navigate_handler),
        )
}
