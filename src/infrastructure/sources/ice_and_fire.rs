//! An API of Ice and Fire adapter (paginated).

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::error::{SourceError, SourceResult};
use super::http::{RecordPage, get_records};
use super::models::RawIceAndFireCharacter;
use crate::domain::entities::{
    Character, NOT_AVAILABLE, SEE_ALLEGIANCES, SourceTag, UNKNOWN, non_blank, split_name,
};
use crate::domain::sources::{CharacterSource, SourceBatch};

/// Default Ice and Fire endpoint.
pub const ICE_AND_FIRE_API_URL: &str = "https://www.anapioficeandfire.com/api/characters";

/// Page size requested from the API (its maximum).
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on pages requested in one fetch.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Why the page loop stopped.
#[derive(Debug)]
enum PaginationEnd {
    /// An empty page was returned.
    Exhausted,
    /// A request failed; earlier pages are kept.
    Error(SourceError),
    /// `max_pages` pages were read without reaching an empty page.
    PageCap,
    /// The given page repeated the previous one.
    RepeatedPage(u32),
}

/// Records gathered by one pass over the pages.
#[derive(Debug)]
struct PageCrawl {
    records: Vec<RawIceAndFireCharacter>,
    pages_read: u32,
    end: PaginationEnd,
}

/// Reads the Ice and Fire character list page by page.
///
/// Pages are requested strictly in order because the loop only continues
/// while the previous page was non-empty.
pub struct IceAndFireSource {
    client: Client,
    endpoint: Url,
    page_size: u32,
    max_pages: u32,
}

impl IceAndFireSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn page_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &self.page_size.to_string());
        url
    }

    async fn fetch_page(&self, page: u32) -> SourceResult<RecordPage<RawIceAndFireCharacter>> {
        let tag = SourceTag::IceAndFire;
        metrics::counter!("upstream_requests_total", "source" => tag.as_str()).increment(1);
        get_records(&self.client, self.page_url(page)).await
    }

    async fn crawl(&self) -> PageCrawl {
        let mut records = Vec::new();
        let mut previous: Option<Vec<RawIceAndFireCharacter>> = None;
        let mut pages_read = 0;

        for page in 1..=self.max_pages {
            let batch = match self.fetch_page(page).await {
                Ok(batch) => batch,
                Err(e) => {
                    return PageCrawl {
                        records,
                        pages_read,
                        end: PaginationEnd::Error(e),
                    };
                }
            };
            pages_read += 1;

            if batch.is_exhausted() {
                return PageCrawl {
                    records,
                    pages_read,
                    end: PaginationEnd::Exhausted,
                };
            }

            if !batch.records.is_empty() && previous.as_ref() == Some(&batch.records) {
                return PageCrawl {
                    records,
                    pages_read,
                    end: PaginationEnd::RepeatedPage(page),
                };
            }

            debug!(
                source = "ice_and_fire",
                page,
                count = batch.records.len(),
                skipped = batch.skipped,
                "Fetched page"
            );
            records.extend(batch.records.iter().cloned());
            previous = Some(batch.records);
        }

        PageCrawl {
            records,
            pages_read,
            end: PaginationEnd::PageCap,
        }
    }
}

#[async_trait]
impl CharacterSource for IceAndFireSource {
    async fn fetch(&self) -> SourceBatch {
        let crawl = self.crawl().await;
        let received = crawl.records.len();

        let characters: Vec<Character> = crawl
            .records
            .into_iter()
            .filter(|raw| raw.name.as_deref().is_some_and(|name| !name.is_empty()))
            .map(map_record)
            .collect();

        let tag = SourceTag::IceAndFire;
        let batch = match crawl.end {
            PaginationEnd::Exhausted => SourceBatch::complete(tag, characters),
            PaginationEnd::Error(e) => {
                metrics::counter!("upstream_failures_total", "source" => tag.as_str())
                    .increment(1);
                warn!(
                    source = "ice_and_fire",
                    pages_read = crawl.pages_read,
                    timeout = e.is_timeout(),
                    "Error fetching Ice and Fire page {}: {}",
                    crawl.pages_read + 1,
                    e
                );
                if crawl.pages_read == 0 {
                    SourceBatch::failed(tag, e.to_string())
                } else {
                    SourceBatch::truncated(
                        tag,
                        characters,
                        format!("page {} failed: {}", crawl.pages_read + 1, e),
                    )
                }
            }
            PaginationEnd::PageCap => {
                warn!(
                    source = "ice_and_fire",
                    max_pages = self.max_pages,
                    "Page limit reached before an empty page"
                );
                SourceBatch::truncated(
                    tag,
                    characters,
                    format!("stopped after {} pages", self.max_pages),
                )
            }
            PaginationEnd::RepeatedPage(page) => {
                warn!(
                    source = "ice_and_fire",
                    page,
                    "Page repeated the previous one, stopping"
                );
                let reason = format!("page {page} repeated page {}", page - 1);
                SourceBatch::truncated(tag, characters, reason)
            }
        };

        info!(
            source = "ice_and_fire",
            pages = crawl.pages_read,
            received,
            mapped = batch.characters.len(),
            "Fetched Ice and Fire characters"
        );

        batch
    }
}

/// Extracts the numeric id from the last path segment of a record URL.
///
/// ```text
/// https://anapioficeandfire.com/api/characters/583 -> Some(583)
/// ```
pub(crate) fn extract_id(record_url: &str) -> Option<u32> {
    let url = Url::parse(record_url).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?
        .parse()
        .ok()
}

/// Maps one Ice and Fire record into the canonical shape.
///
/// Callers drop records with an empty `name` beforehand; a name made only of
/// whitespace still reaches this point and gets the numbered placeholder.
pub(crate) fn map_record(raw: RawIceAndFireCharacter) -> Character {
    let id = raw.url.as_deref().and_then(extract_id);

    let full_name = non_blank(raw.name.as_deref()).unwrap_or_else(|| match id {
        Some(id) => format!("Unknown character #{id}"),
        None => "Unknown character".to_string(),
    });

    let (first_name, last_name) = split_name(&full_name);
    let first_name = if first_name.is_empty() {
        UNKNOWN.to_string()
    } else {
        first_name
    };

    let family = if raw.allegiances.iter().any(|a| !a.trim().is_empty()) {
        SEE_ALLEGIANCES.to_string()
    } else {
        UNKNOWN.to_string()
    };

    Character {
        id: id.unwrap_or_default(),
        full_name,
        first_name,
        last_name,
        image: None,
        born: non_blank(raw.born.as_deref()).unwrap_or_else(|| UNKNOWN.to_string()),
        died: non_blank(raw.died.as_deref()).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        titles: raw.titles.iter().filter_map(|t| non_blank(Some(t))).collect(),
        aliases: raw.aliases.iter().filter_map(|a| non_blank(Some(a))).collect(),
        family,
        family_crest: None,
        source: SourceTag::IceAndFire,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawIceAndFireCharacter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_id() {
        assert_eq!(
            extract_id("https://www.anapioficeandfire.com/api/characters/583"),
            Some(583)
        );
        assert_eq!(extract_id("https://example.com/api/characters/12/"), Some(12));
        assert_eq!(extract_id("https://example.com/api/characters/abc"), None);
        assert_eq!(extract_id("not a url"), None);
    }

    #[test]
    fn test_map_record_full() {
        let character = map_record(raw(
            r#"{"url": "https://www.anapioficeandfire.com/api/characters/583",
                "name": "Jon Snow", "born": "In 283 AC", "died": "",
                "titles": ["Lord Commander of the Night's Watch", ""],
                "aliases": ["Lord Snow", "", "Ned Stark's Bastard"],
                "allegiances": ["https://www.anapioficeandfire.com/api/houses/362"]}"#,
        ));

        assert_eq!(character.id, 583);
        assert_eq!(character.full_name, "Jon Snow");
        assert_eq!(character.first_name, "Jon");
        assert_eq!(character.last_name, "Snow");
        assert_eq!(character.born, "In 283 AC");
        assert_eq!(character.died, NOT_AVAILABLE);
        assert_eq!(character.titles.len(), 1);
        assert_eq!(character.aliases, vec!["Lord Snow", "Ned Stark's Bastard"]);
        assert_eq!(character.family, SEE_ALLEGIANCES);
        assert_eq!(character.image, None);
        assert_eq!(character.source, SourceTag::IceAndFire);
    }

    #[test]
    fn test_family_unknown_without_allegiances() {
        let character = map_record(raw(r#"{"url": "https://example.com/api/characters/2",
                "name": "Walder", "allegiances": []}"#));

        assert_eq!(character.family, UNKNOWN);
        assert!(character.titles.is_empty());
    }

    #[test]
    fn test_blank_name_gets_numbered_placeholder() {
        let character = map_record(raw(
            r#"{"url": "https://example.com/api/characters/1", "name": "   "}"#,
        ));

        assert_eq!(character.full_name, "Unknown character #1");
    }

    #[test]
    fn test_page_url_carries_pagination() {
        let source = IceAndFireSource::new(
            Client::new(),
            Url::parse("https://example.com/api/characters").unwrap(),
        )
        .with_page_size(25);

        assert_eq!(
            source.page_url(3).as_str(),
            "https://example.com/api/characters?page=3&pageSize=25"
        );
    }
}
