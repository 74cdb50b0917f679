//! ThronesAPI adapter (single request, full list).

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use super::error::SourceResult;
use super::http::{RecordPage, get_records};
use super::models::{RawThronesCharacter, TitleField};
use crate::domain::entities::{
    Character, NO_TITLE, NOT_AVAILABLE, SourceTag, UNKNOWN, non_blank, split_name,
};
use crate::domain::sources::{CharacterSource, SourceBatch};

/// Default ThronesAPI endpoint.
pub const THRONES_API_URL: &str = "https://thronesapi.com/api/v2/Characters";

/// Reads the whole ThronesAPI character list with one request.
pub struct ThronesApiSource {
    client: Client,
    endpoint: Url,
}

impl ThronesApiSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    async fn fetch_records(&self) -> SourceResult<RecordPage<RawThronesCharacter>> {
        metrics::counter!("upstream_requests_total", "source" => SourceTag::Thrones.as_str())
            .increment(1);
        get_records(&self.client, self.endpoint.clone()).await
    }
}

#[async_trait]
impl CharacterSource for ThronesApiSource {
    async fn fetch(&self) -> SourceBatch {
        match self.fetch_records().await {
            Ok(page) => {
                let received = page.records.len() + page.skipped;
                let characters: Vec<Character> =
                    page.records.into_iter().filter_map(map_record).collect();

                info!(
                    source = "thrones",
                    received,
                    skipped = page.skipped,
                    mapped = characters.len(),
                    "Fetched ThronesAPI characters"
                );
                SourceBatch::complete(SourceTag::Thrones, characters)
            }
            Err(e) => {
                let tag = SourceTag::Thrones;
                metrics::counter!("upstream_failures_total", "source" => tag.as_str())
                    .increment(1);
                error!(
                    source = "thrones",
                    timeout = e.is_timeout(),
                    "Error fetching ThronesAPI: {}",
                    e
                );
                SourceBatch::failed(tag, e.to_string())
            }
        }
    }
}

/// Maps one ThronesAPI record into the canonical shape.
///
/// `fullName` falls back to `"{firstName} {lastName}"`; a record with no
/// usable name at all is skipped.
pub(crate) fn map_record(raw: RawThronesCharacter) -> Option<Character> {
    let first = non_blank(raw.first_name.as_deref());
    let last = non_blank(raw.last_name.as_deref());

    let full_name = non_blank(raw.full_name.as_deref()).or_else(|| {
        let joined = format!(
            "{} {}",
            first.as_deref().unwrap_or_default(),
            last.as_deref().unwrap_or_default()
        );
        non_blank(Some(&joined))
    });

    let Some(full_name) = full_name else {
        debug!(source = "thrones", "Skipping record without a name");
        return None;
    };

    let (derived_first, derived_last) = split_name(&full_name);
    let first_name = first.unwrap_or(derived_first);
    let first_name = if first_name.is_empty() {
        UNKNOWN.to_string()
    } else {
        first_name
    };
    let last_name = last.unwrap_or(derived_last);

    let image_url = non_blank(raw.image_url.as_deref());

    Some(Character {
        id: 0,
        full_name,
        first_name,
        last_name,
        image: image_url.clone().or_else(|| non_blank(raw.image.as_deref())),
        born: non_blank(raw.born.as_deref()).unwrap_or_else(|| UNKNOWN.to_string()),
        died: non_blank(raw.died.as_deref()).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        titles: map_titles(raw.title),
        aliases: raw
            .aliases
            .iter()
            .filter_map(|a| non_blank(Some(a)))
            .collect(),
        family: non_blank(raw.family.as_deref()).unwrap_or_else(|| UNKNOWN.to_string()),
        family_crest: image_url,
        source: SourceTag::Thrones,
    })
}

fn map_titles(title: Option<TitleField>) -> Vec<String> {
    let titles: Vec<String> = match title {
        Some(TitleField::One(t)) => non_blank(Some(&t)).into_iter().collect(),
        Some(TitleField::Many(ts)) => ts.iter().filter_map(|t| non_blank(Some(t))).collect(),
        None => Vec::new(),
    };

    if titles.is_empty() {
        vec![NO_TITLE.to_string()]
    } else {
        titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawThronesCharacter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_name_falls_back_to_first_and_last() {
        let character =
            map_record(raw(r#"{"firstName": "Jon", "lastName": "Snow"}"#)).unwrap();

        assert_eq!(character.full_name, "Jon Snow");
        assert_eq!(character.first_name, "Jon");
        assert_eq!(character.last_name, "Snow");
    }

    #[test]
    fn test_full_name_fallback_is_trimmed() {
        let character = map_record(raw(r#"{"firstName": "Hodor", "lastName": ""}"#)).unwrap();

        assert_eq!(character.full_name, "Hodor");
        assert_eq!(character.last_name, "");
    }

    #[test]
    fn test_record_without_any_name_is_skipped() {
        assert!(map_record(raw(r#"{"family": "House Stark"}"#)).is_none());
    }

    #[test]
    fn test_first_and_last_derived_from_full_name() {
        let character = map_record(raw(r#"{"fullName": "Daenerys Targaryen"}"#)).unwrap();

        assert_eq!(character.first_name, "Daenerys");
        assert_eq!(character.last_name, "Targaryen");
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let character = map_record(raw(r#"{"fullName": "Varys"}"#)).unwrap();

        assert_eq!(character.titles, vec![NO_TITLE.to_string()]);
        assert_eq!(character.family, UNKNOWN);
        assert_eq!(character.born, UNKNOWN);
        assert_eq!(character.died, NOT_AVAILABLE);
        assert_eq!(character.image, None);
        assert!(character.aliases.is_empty());
        assert_eq!(character.source, SourceTag::Thrones);
    }

    #[test]
    fn test_image_prefers_image_url() {
        let character = map_record(raw(
            r#"{"fullName": "Arya Stark", "image": "arya.jpg",
                "imageUrl": "https://thronesapi.com/assets/images/arya.jpg",
                "title": "No One", "family": "House Stark"}"#,
        ))
        .unwrap();

        assert_eq!(
            character.image.as_deref(),
            Some("https://thronesapi.com/assets/images/arya.jpg")
        );
        assert_eq!(character.family_crest, character.image);
        assert_eq!(character.titles, vec!["No One".to_string()]);
        assert_eq!(character.family, "House Stark");
    }

    #[test]
    fn test_image_falls_back_to_image_field() {
        let character =
            map_record(raw(r#"{"fullName": "Arya Stark", "image": "arya.jpg"}"#)).unwrap();

        assert_eq!(character.image.as_deref(), Some("arya.jpg"));
        assert_eq!(character.family_crest, None);
    }

    #[test]
    fn test_title_array_drops_blanks() {
        let character =
            map_record(raw(r#"{"fullName": "Robert Baratheon", "title": ["King", " "]}"#)).unwrap();

        assert_eq!(character.titles, vec!["King".to_string()]);
    }
}
