//! HTML page handlers.
//!
//! Every page renders the same template; handlers only decide which
//! characters, detail card and banner it shows.

pub mod character;
pub mod gallery;
pub mod page;
pub mod search;

pub use character::character_page_handler;
pub use gallery::gallery_handler;
pub use search::{search_handler, search_query_handler};
