//! Data Transfer Objects for API requests and responses.
//!
//! Response DTOs keep the camelCase field names the gallery's client script
//! reads (`success`, `data`, `totalCharacters`).

pub mod character;
pub mod health;
pub mod search;
