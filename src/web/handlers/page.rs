//! The single gallery page template and its view models.

use askama::Template;
use askama_web::WebTemplate;

use crate::domain::query::Direction;
use crate::domain::entities::Character;

/// Banner shown above the gallery.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Detail card with the ids of its neighbours for the prev/next links.
#[derive(Debug, Clone)]
pub struct Detail {
    pub character: Character,
    pub prev_id: u32,
    pub next_id: u32,
}

/// Template for every HTML page.
///
/// Renders `templates/index.html`: an optional detail card, an optional
/// notice and a gallery of `characters`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub detail: Option<Detail>,
    pub characters: Vec<Character>,
    pub notice: Option<Notice>,
    pub total_characters: usize,
}

impl IndexTemplate {
    /// Gallery of `characters`, out of `total` merged characters.
    pub fn gallery(characters: Vec<Character>, total: usize, notice: Option<Notice>) -> Self {
        let notice = notice.or_else(|| {
            (total == 0).then(|| Notice::error("No characters available"))
        });

        Self {
            detail: None,
            characters,
            notice,
            total_characters: total,
        }
    }

    /// Detail card for the character at `index` in `all`.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn detail(all: &[Character], index: usize) -> Option<Self> {
        let character = all.get(index)?.clone();
        let len = all.len();

        Some(Self {
            detail: Some(Detail {
                prev_id: all[Direction::Prev.step(index, len)].id,
                next_id: all[Direction::Next.step(index, len)].id,
                character,
            }),
            characters: Vec::new(),
            notice: None,
            total_characters: len,
        })
    }
}
