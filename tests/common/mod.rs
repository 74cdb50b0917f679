#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thrones_gallery::application::services::CharacterService;
use thrones_gallery::config::Config;
use thrones_gallery::domain::entities::{Character, SourceTag, UNKNOWN, split_name};
use thrones_gallery::domain::sources::{CharacterSource, SourceBatch};
use thrones_gallery::infrastructure::cache::CharacterCache;
use thrones_gallery::server::build_character_service;
use thrones_gallery::state::AppState;
use url::Url;

/// What a fake upstream answers for one request.
#[derive(Debug, Clone)]
pub enum FakePage {
    Records(Value),
    Status(StatusCode),
    /// Sleeps before answering with an empty list.
    Delay(Duration),
}

impl FakePage {
    async fn respond(self) -> Response {
        match self {
            FakePage::Records(body) => Json(body).into_response(),
            FakePage::Status(status) => (status, "upstream error").into_response(),
            FakePage::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Json(json!([])).into_response()
            }
        }
    }
}

/// A fake API running on a local port.
pub struct FakeApi {
    pub url: Url,
    pub hits: Arc<AtomicUsize>,
    /// `(page, pageSize)` of every request, in arrival order.
    pub requests: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl FakeApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(page, _)| *page)
            .collect()
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Serves `page` for every request to `/api/v2/Characters`.
pub async fn spawn_thrones_api(page: FakePage) -> FakeApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let counter = hits.clone();
    let router = Router::new().route(
        "/api/v2/Characters",
        get(move || {
            let page = page.clone();
            counter.fetch_add(1, Ordering::SeqCst);
            async move { page.respond().await }
        }),
    );

    let addr = serve(router).await;
    FakeApi {
        url: Url::parse(&format!("http://{addr}/api/v2/Characters")).unwrap(),
        hits,
        requests,
    }
}

/// Serves `pages[page - 1]` for `/api/characters?page=N`, and an empty list
/// past the end.
pub async fn spawn_ice_and_fire_api(pages: Vec<FakePage>) -> FakeApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let pages = Arc::new(pages);

    let counter = hits.clone();
    let seen = requests.clone();
    let router = Router::new().route(
        "/api/characters",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let pages = pages.clone();
            counter.fetch_add(1, Ordering::SeqCst);

            let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let page_size: u32 = query
                .get("pageSize")
                .and_then(|p| p.parse().ok())
                .unwrap_or(10);
            seen.lock().unwrap().push((page, page_size));

            async move {
                let response = pages
                    .get(page as usize - 1)
                    .cloned()
                    .unwrap_or(FakePage::Records(json!([])));
                response.respond().await
            }
        }),
    );

    let addr = serve(router).await;
    FakeApi {
        url: Url::parse(&format!("http://{addr}/api/characters")).unwrap(),
        hits,
        requests,
    }
}

/// An address nothing listens on.
pub fn unreachable_url() -> Url {
    Url::parse("http://127.0.0.1:9/api/characters").unwrap()
}

pub fn thrones_record(id: u32, full_name: &str) -> Value {
    let (first, last) = split_name(full_name);
    json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "fullName": full_name,
        "title": "Lord",
        "family": format!("House {last}"),
        "image": format!("{id}.jpg"),
        "imageUrl": format!("https://thronesapi.com/assets/images/{id}.jpg")
    })
}

pub fn ice_and_fire_record(id: u32, name: &str) -> Value {
    json!({
        "url": format!("https://www.anapioficeandfire.com/api/characters/{id}"),
        "name": name,
        "gender": "Female",
        "culture": "",
        "born": "",
        "died": "",
        "titles": [""],
        "aliases": ["", "Alias"],
        "father": "",
        "mother": "",
        "spouse": "",
        "allegiances": [],
        "books": [],
        "povBooks": [],
        "tvSeries": [""],
        "playedBy": [""]
    })
}

/// `total` Ice and Fire records named `Character {n}`, split into pages.
pub fn ice_and_fire_pages(total: u32, page_size: u32) -> Vec<FakePage> {
    let records: Vec<Value> = (1..=total)
        .map(|n| ice_and_fire_record(n, &format!("Character {n}")))
        .collect();

    records
        .chunks(page_size as usize)
        .map(|chunk| FakePage::Records(Value::Array(chunk.to_vec())))
        .collect()
}

/// Configuration pointing both sources at the given endpoints.
pub fn test_config(thrones: &Url, ice_and_fire: &Url) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "debug".to_string(),
        log_format: "text".to_string(),
        thrones_api_url: thrones.to_string(),
        ice_and_fire_api_url: ice_and_fire.to_string(),
        ice_and_fire_page_size: 50,
        ice_and_fire_max_pages: 100,
        http_timeout_seconds: 5,
        cache_empty_results: false,
        preload: false,
        rate_limit_enabled: false,
        static_dir: "static".to_string(),
    }
}

/// Service wired to real HTTP adapters, as the server builds it.
pub fn create_http_service(config: &Config) -> Arc<CharacterService> {
    build_character_service(config).unwrap()
}

/// A source returning a fixed batch and counting its calls.
pub struct StaticSource {
    batch: SourceBatch,
    pub calls: Arc<AtomicUsize>,
}

impl StaticSource {
    pub fn new(batch: SourceBatch) -> Self {
        Self {
            batch,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CharacterSource for StaticSource {
    async fn fetch(&self) -> SourceBatch {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch.clone()
    }
}

pub fn create_test_character(name: &str, source: SourceTag) -> Character {
    let (first_name, last_name) = split_name(name);
    Character {
        id: 0,
        full_name: name.to_string(),
        first_name,
        last_name,
        image: None,
        born: UNKNOWN.to_string(),
        died: "N/A".to_string(),
        titles: vec![],
        aliases: vec![],
        family: UNKNOWN.to_string(),
        family_crest: None,
        source,
    }
}

pub fn batch(source: SourceTag, names: &[&str]) -> SourceBatch {
    SourceBatch::complete(
        source,
        names
            .iter()
            .map(|n| create_test_character(n, source))
            .collect(),
    )
}

/// State over two in-memory sources.
pub fn create_test_state(primary: SourceBatch, secondary: SourceBatch) -> AppState {
    let service = CharacterService::new(
        Arc::new(StaticSource::new(primary)),
        Arc::new(StaticSource::new(secondary)),
        Arc::new(CharacterCache::new(false)),
    );
    AppState::new(Arc::new(service))
}

/// State with three ThronesAPI and two Ice and Fire characters, one of which
/// collides with a ThronesAPI name.
pub fn create_gallery_state() -> AppState {
    create_test_state(
        batch(
            SourceTag::Thrones,
            &["Jon Snow", "Arya Stark", "Tyrion Lannister"],
        ),
        batch(SourceTag::IceAndFire, &["jon snow", "Sansa Stark"]),
    )
}
