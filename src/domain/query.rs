//! Lookups over a merged character list.
//!
//! Shared by [`crate::application::services::CharacterService`] and the
//! handlers that need the whole list next to the result.

use std::str::FromStr;

use crate::domain::entities::{Character, normalize_name};

/// Direction for gallery navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Index of the neighbour of `index` in a list of `len` items, wrapping
    /// around at both ends.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Self::Next => (index + 1) % len,
            Self::Prev => (index + len - 1) % len,
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            _ => Err(()),
        }
    }
}

/// Position of the character with `id`.
pub fn position_of(characters: &[Character], id: u32) -> Option<usize> {
    characters.iter().position(|c| c.id == id)
}

pub fn find_by_id(characters: &[Character], id: u32) -> Option<&Character> {
    characters.iter().find(|c| c.id == id)
}

/// Case-insensitive substring search over full names.
///
/// A blank term matches nothing.
pub fn search<'a>(characters: &'a [Character], term: &str) -> Vec<&'a Character> {
    let needle = normalize_name(term);
    if needle.is_empty() {
        return Vec::new();
    }

    characters
        .iter()
        .filter(|c| c.name_contains(&needle))
        .collect()
}

/// The neighbour of `current_id`, wrapping around at both ends.
///
/// `None` when `current_id` is not in the list.
pub fn neighbour(
    characters: &[Character],
    current_id: u32,
    direction: Direction,
) -> Option<&Character> {
    let index = position_of(characters, current_id)?;
    characters.get(direction.step(index, characters.len()))
}
