//! Handler for prev/next navigation between characters.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::character::CharacterResponse;
use crate::domain::query::{self, Direction};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the character before or after `current_id`, wrapping around.
///
/// # Endpoint
///
/// `GET /api/character/navigate/{direction}/{current_id}`
///
/// `direction` is `next` or `prev`. Past the last character `next` returns
/// the first one, and before the first `prev` returns the last one.
///
/// # Errors
///
/// - 404 Not Found if `current_id` is not in the list (checked first)
/// - 400 Bad Request if `direction` is neither `next` nor `prev`
pub async fn navigate_handler(
    State(state): State<AppState>,
    Path((direction, current_id)): Path<(String, String)>,
) -> Result<Json<CharacterResponse>, AppError> {
    let characters = state.character_service.get_merged_characters().await;

    let current = current_id
        .parse::<u32>()
        .ok()
        .filter(|id| query::position_of(&characters, *id).is_some())
        .ok_or_else(|| {
            AppError::not_found(
                "Current character not found",
                json!({ "current_id": current_id }),
            )
        })?;

    let direction: Direction = direction.parse().map_err(|_| {
        AppError::bad_request(
            "Invalid direction. Use 'next' or 'prev'",
            json!({ "direction": direction }),
        )
    })?;

    let character = query::neighbour(&characters, current, direction)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(
                "Current character not found",
                json!({ "current_id": current }),
            )
        })?;

    Ok(Json(CharacterResponse {
        success: true,
        data: character,
        total_characters: characters.len(),
    }))
}
