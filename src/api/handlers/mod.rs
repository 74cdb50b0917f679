//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod characters;
pub mod health;
pub mod navigate;

pub use characters::{character_count_handler, character_handler, character_list_handler};
pub use health::health_handler;
pub use navigate::navigate_handler;
