//! Character detail page handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::page::{IndexTemplate, Notice};
use crate::domain::query;
use crate::state::AppState;

/// Renders the detail card of one character with prev/next links.
///
/// # Endpoint
///
/// `GET /character/{id}`
///
/// An unknown or non-numeric id renders the full gallery with an error
/// banner and status 404.
pub async fn character_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let characters = state.character_service.get_merged_characters().await;

    let page = id
        .parse::<u32>()
        .ok()
        .and_then(|id| query::position_of(&characters, id))
        .and_then(|index| IndexTemplate::detail(&characters, index));

    match page {
        Some(page) => page.into_response(),
        None => {
            let page = IndexTemplate::gallery(
                characters.as_ref().clone(),
                characters.len(),
                Some(Notice::error("Character not found")),
            );
            (StatusCode::NOT_FOUND, page).into_response()
        }
    }
}
