//! JSON API layer.
//!
//! Exposes the merged character list to the gallery's client script.
//!
//! # Modules
//!
//! - [`dto`] - Response and query DTOs
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
