//! Character entity representing one merged gallery entry.

use serde::Serialize;

/// Placeholder used for `born` and `family` when a source has no value.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder used for `died` when a source has no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Single-element title list used when ThronesAPI has no title.
pub const NO_TITLE: &str = "No title";

/// Family description used when Ice and Fire lists at least one allegiance.
pub const SEE_ALLEGIANCES: &str = "See allegiances";

/// Which upstream API produced a record before the merge.
///
/// Serialized as `"A"` (ThronesAPI) or `"B"` (An API of Ice and Fire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceTag {
    #[serde(rename = "A")]
    Thrones,
    #[serde(rename = "B")]
    IceAndFire,
}

impl SourceTag {
    /// Short label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thrones => "thrones",
            Self::IceAndFire => "ice_and_fire",
        }
    }

    /// Name of the upstream API as shown on the detail card.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Thrones => "ThronesAPI",
            Self::IceAndFire => "An API of Ice and Fire",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character in the canonical, source-independent shape.
///
/// `id` is only meaningful after the merge: adapters emit `0` and the merge
/// engine overwrites it with the 1-based position in the final list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u32,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub born: String,
    pub died: String,
    pub titles: Vec<String>,
    pub aliases: Vec<String>,
    pub family: String,
    pub family_crest: Option<String>,
    pub source: SourceTag,
}

impl Character {
    /// Deduplication key of this character.
    pub fn key(&self) -> String {
        normalize_name(&self.full_name)
    }

    /// Case-insensitive substring match on the full name.
    ///
    /// `needle` must already be normalized with [`normalize_name`].
    pub fn name_contains(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle)
    }
}

/// Lowercases and trims a name for comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Splits a full name on its first space into `(first, last)`.
///
/// ```
/// use thrones_gallery::domain::entities::split_name;
///
/// assert_eq!(split_name("Jon Snow"), ("Jon".to_string(), "Snow".to_string()));
/// assert_eq!(split_name("Daenerys"), ("Daenerys".to_string(), String::new()));
/// ```
pub fn split_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}

/// Returns the trimmed value, or `None` if it is missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jon Snow "), "jon snow");
        assert_eq!(normalize_name("ARYA"), "arya");
    }

    #[test]
    fn test_split_name_multiple_words() {
        let (first, last) = split_name("Brandon the Builder");
        assert_eq!(first, "Brandon");
        assert_eq!(last, "the Builder");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_source_tag_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&SourceTag::Thrones).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&SourceTag::IceAndFire).unwrap(), "\"B\"");
    }

    #[test]
    fn test_name_contains() {
        let character = Character {
            id: 1,
            full_name: "Tyrion Lannister".to_string(),
            first_name: "Tyrion".to_string(),
            last_name: "Lannister".to_string(),
            image: None,
            born: UNKNOWN.to_string(),
            died: NOT_AVAILABLE.to_string(),
            titles: vec![],
            aliases: vec![],
            family: UNKNOWN.to_string(),
            family_crest: None,
            source: SourceTag::Thrones,
        };

        assert!(character.name_contains("lannister"));
        assert!(!character.name_contains("stark"));
        assert_eq!(character.key(), "tyrion lannister");
    }
}
