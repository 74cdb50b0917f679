//! Server-rendered gallery pages.
//!
//! Uses Askama templates from `templates/`; the client script in
//! `static/js/main.js` drives search and navigation through the JSON API.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
