//! HTTP adapters for the upstream character APIs.
//!
//! Provides two [`crate::domain::sources::CharacterSource`] implementations:
//! - [`ThronesApiSource`] - ThronesAPI, one request for the whole list
//! - [`IceAndFireSource`] - An API of Ice and Fire, paginated
//!
//! Both share one `reqwest::Client`, so the per-request timeout configured on
//! the client applies to every upstream call.

mod error;
mod http;
mod ice_and_fire;
mod models;
mod thrones_api;

pub use error::{SourceError, SourceResult};
pub use ice_and_fire::{
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, ICE_AND_FIRE_API_URL, IceAndFireSource,
};
pub use models::{RawIceAndFireCharacter, RawThronesCharacter, TitleField};
pub use thrones_api::{THRONES_API_URL, ThronesApiSource};
