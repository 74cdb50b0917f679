//! Business logic services for the application layer.

pub mod character_service;

pub use character_service::{CharacterService, Direction};
