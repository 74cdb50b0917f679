//! Handlers for the character list, count and lookup endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::character::{CharacterListResponse, CharacterResponse, CountResponse};
use crate::domain::query;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the whole merged list.
///
/// # Endpoint
///
/// `GET /api/characters`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": [{ "id": 1, "fullName": "Daenerys Targaryen", "source": "A", ... }],
///   "totalCharacters": 1
/// }
/// ```
///
/// An empty `data` array means no upstream API returned characters.
pub async fn character_list_handler(State(state): State<AppState>) -> Json<CharacterListResponse> {
    let characters = state.character_service.get_merged_characters().await;

    Json(CharacterListResponse {
        success: true,
        total_characters: characters.len(),
        data: characters.as_ref().clone(),
    })
}

/// Returns the number of merged characters.
///
/// # Endpoint
///
/// `GET /api/characters/count`
pub async fn character_count_handler(State(state): State<AppState>) -> Json<CountResponse> {
    let count = state.character_service.get_merged_characters().await.len();

    Json(CountResponse {
        success: true,
        count,
    })
}

/// Returns one character by its merged id.
///
/// # Endpoint
///
/// `GET /api/characters/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the id is not a number or not in the list.
pub async fn character_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponse>, AppError> {
    let characters = state.character_service.get_merged_characters().await;

    let character = id
        .parse::<u32>()
        .ok()
        .and_then(|id| query::find_by_id(&characters, id))
        .ok_or_else(|| AppError::not_found("Character not found", json!({ "id": id })))?;

    Ok(Json(CharacterResponse {
        success: true,
        data: character.clone(),
        total_characters: characters.len(),
    }))
}
