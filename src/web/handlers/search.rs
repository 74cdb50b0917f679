//! Search results page handlers.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::debug;
use validator::Validate;

use super::page::{IndexTemplate, Notice};
use crate::api::dto::search::SearchQuery;
use crate::domain::query;
use crate::state::AppState;

/// Renders the results for a name taken from the path.
///
/// # Endpoint
///
/// `GET /search/{name}`
pub async fn search_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    render_search(&state, &name).await
}

/// Renders the results for the `q` query parameter.
///
/// # Endpoint
///
/// `GET /search?q=...`
///
/// Used by the search form when JavaScript is disabled. A missing or
/// oversized term renders the gallery with the validation message.
pub async fn search_query_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        debug!("Rejected search query: {}", e);
        let characters = state.character_service.get_merged_characters().await;
        let total = characters.len();
        return IndexTemplate::gallery(
            characters.as_ref().clone(),
            total,
            Some(Notice::error("Search term must be 1 to 100 characters")),
        );
    }

    render_search(&state, &query.q).await
}

/// Picks the page for a search term.
///
/// - several matches: gallery of the matches with a count banner
/// - one match: that character's detail card
/// - no match: full gallery with an error banner
async fn render_search(state: &AppState, term: &str) -> IndexTemplate {
    let term = term.trim();
    let characters = state.character_service.get_merged_characters().await;
    let total = characters.len();
    let mut matches = query::search(&characters, term);

    match matches.len() {
        0 => IndexTemplate::gallery(
            characters.as_ref().clone(),
            total,
            Some(Notice::error(format!("No character matches \"{term}\""))),
        ),
        1 => {
            let found = matches.remove(0);
            query::position_of(&characters, found.id)
                .and_then(|index| IndexTemplate::detail(&characters, index))
                .unwrap_or_else(|| IndexTemplate::gallery(vec![found.clone()], total, None))
        }
        count => IndexTemplate::gallery(
            matches.into_iter().cloned().collect(),
            total,
            Some(Notice::info(format!(
                "Found {count} characters for \"{term}\""
            ))),
        ),
    }
}
