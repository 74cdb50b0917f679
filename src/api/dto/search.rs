//! Query parameters for the search form.

use serde::Deserialize;
use validator::Validate;

/// `GET /search?q=...` parameters, submitted by the search form when
/// JavaScript is unavailable.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Search term must be 1 to 100 characters"))]
    pub q: String,
}
