//! # Thrones Gallery
//!
//! A Game of Thrones character gallery built with Axum. Characters come from
//! two public APIs, ThronesAPI and An API of Ice and Fire, which are fetched
//! concurrently, merged into one deduplicated list and cached for the life of
//! the process.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Character entity, source trait, merge engine
//! - **Application Layer** ([`application`]) - Query facade over fetch, merge and cache
//! - **Infrastructure Layer** ([`infrastructure`]) - Upstream API adapters and the cache
//! - **API Layer** ([`api`]) - JSON handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - Server-rendered gallery pages
//!
//! ## Features
//!
//! - ThronesAPI records win name collisions over Ice and Fire records
//! - Ice and Fire pagination with a page cap and partial-result reporting
//! - Single-flight cache population; one failing API only shrinks the list
//! - Search and wrap-around navigation over the merged list
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! # then open http://localhost:3000
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CharacterService, Direction};
    pub use crate::domain::entities::{Character, SourceTag};
    pub use crate::domain::sources::{CharacterSource, FetchOutcome, SourceBatch};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::CharacterCache;
    pub use crate::state::AppState;
}
