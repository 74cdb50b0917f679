//! HTML page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    character_page_handler, gallery_handler, search_handler, search_query_handler,
};
use axum::{Router, routing::get};

/// Page routes, mounted at the root.
///
/// # Endpoints
///
/// - `GET /`                - Gallery of every character
/// - `GET /character/{id}`  - Detail card
/// - `GET /search/{name}`   - Search by name from the path
/// - `GET /search?q=`       - Search form fallback
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery_handler))
        .route("/character/{id}", get(character_page_handler))
        .route("/search", get(search_query_handler))
        .route("/search/{name}", get(search_handler))
}
