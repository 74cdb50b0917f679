//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::CharacterService;

/// State shared by all routes.
///
/// Cloning is cheap: the service (and the cache it owns) sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub character_service: Arc<CharacterService>,
}

impl AppState {
    pub fn new(character_service: Arc<CharacterService>) -> Self {
        Self { character_service }
    }
}
