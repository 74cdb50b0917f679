//! DTOs for the character endpoints.

use serde::Serialize;

use crate::domain::entities::Character;

/// Full merged list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterListResponse {
    pub success: bool,
    pub data: Vec<Character>,
    pub total_characters: usize,
}

/// A single character plus the size of the list it belongs to.
///
/// Used by both the lookup and the navigation endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub success: bool,
    pub data: Character,
    pub total_characters: usize,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: usize,
}
