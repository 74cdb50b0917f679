//! Infrastructure layer for external integrations.
//!
//! Implements the source trait defined by the domain layer against the real
//! upstream APIs and holds the process-lifetime character cache.
//!
//! # Modules
//!
//! - [`cache`] - In-process cache of the merged list
//! - [`sources`] - HTTP adapters for ThronesAPI and An API of Ice and Fire

pub mod cache;
pub mod sources;
