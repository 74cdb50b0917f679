//! Merge engine combining both sources into one gallery list.

use std::collections::HashSet;

use crate::domain::entities::Character;

/// Merges two character lists into one deduplicated, id-assigned list.
///
/// Records are keyed by their normalized full name. Every record of
/// `primary` is considered before any record of `secondary`, and the first
/// record seen for a key is kept, so on a collision the primary source always
/// wins and duplicates within one source resolve to their first occurrence.
///
/// Output order is insertion order. Ids are reassigned as `position + 1`,
/// ignoring whatever the sources carried.
///
/// The function is pure: the same inputs always produce the same output.
pub fn merge(primary: Vec<Character>, secondary: Vec<Character>) -> Vec<Character> {
    let mut seen: HashSet<String> = HashSet::with_capacity(primary.len() + secondary.len());
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());

    for character in primary.into_iter().chain(secondary) {
        if seen.insert(character.key()) {
            merged.push(character);
        }
    }

    for (index, character) in merged.iter_mut().enumerate() {
        character.id = index as u32 + 1;
    }

    merged
}
