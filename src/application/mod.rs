//! Application layer services.
//!
//! Services sit between the HTTP handlers and the domain: they own the
//! upstream sources and the cache and expose plain-data queries.
//!
//! # Available Services
//!
//! - [`services::character_service::CharacterService`] - Merged character list, search and navigation

pub mod services;
